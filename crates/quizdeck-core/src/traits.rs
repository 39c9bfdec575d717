//! Collaborator traits for question loading and score collection.
//!
//! These async traits are implemented by the `quizdeck-providers` crate.
//! The session driver only ever sees the trait objects, which keeps the
//! state machine testable without a server or a filesystem.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::{Question, ScoreSubmission};

/// A provider of quiz questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "server").
    fn name(&self) -> &str;

    /// Fetch the question set for a new attempt.
    async fn fetch(&self) -> Result<Vec<Question>, SourceError>;
}

/// A collector of finished-attempt scores.
#[async_trait]
pub trait ScoreSink: Send + Sync {
    /// Human-readable sink name (e.g. "history").
    fn name(&self) -> &str;

    /// Record a finished attempt.
    async fn submit(&self, submission: &ScoreSubmission) -> Result<(), SourceError>;
}
