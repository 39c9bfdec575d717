//! Session driver: runs one quiz attempt end to end.
//!
//! The driver owns the pre-session phases the state machine itself never
//! sees: idle (no attempt yet) and loading (question fetch in flight). It
//! renders exclusively through the [`SessionUi`] trait and advances only in
//! response to the UI's answers, so the whole flow stays single-threaded
//! and event-driven.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::error::SessionError;
use crate::model::Question;
use crate::report::SessionSummary;
use crate::session::{Advance, AnswerFeedback, QuizSession};
use crate::traits::{QuestionSource, ScoreSink};

/// Presentation surface for a running attempt.
pub trait SessionUi {
    /// A question has become current. `position` is 1-based.
    fn show_question(&mut self, position: usize, total: usize, question: &Question);

    /// Ask for an answer to the current question. The driver asks again
    /// while the returned label matches none of the question's options.
    fn pick_answer(&mut self, question: &Question) -> Result<char>;

    /// A submitted label matched no option.
    fn reject_answer(&mut self, label: char);

    /// The answer was locked in.
    fn show_feedback(&mut self, feedback: &AnswerFeedback);

    /// The attempt finished.
    fn show_summary(&mut self, summary: &SessionSummary);
}

/// Drives one attempt: username check, question fetch, answer loop,
/// summary, score submission.
pub struct SessionDriver {
    source: Arc<dyn QuestionSource>,
    sink: Arc<dyn ScoreSink>,
}

impl SessionDriver {
    pub fn new(source: Arc<dyn QuestionSource>, sink: Arc<dyn ScoreSink>) -> Self {
        Self { source, sink }
    }

    /// Run a complete attempt for `username`.
    ///
    /// Fails before any session state exists if the username is empty or
    /// the source fails, so a failed start is always retriable with a fresh
    /// call. The question fetch is awaited before anything is shown. Score
    /// submission happens strictly after the summary is displayed; a sink
    /// failure is logged and never surfaces.
    pub async fn run(&self, username: &str, ui: &mut dyn SessionUi) -> Result<SessionSummary> {
        if username.trim().is_empty() {
            return Err(SessionError::EmptyUsername.into());
        }

        let questions = self
            .source
            .fetch()
            .await
            .with_context(|| format!("failed to load questions from {}", self.source.name()))?;

        let mut session = QuizSession::begin(username, questions)?;
        let total = session.total();

        let summary = loop {
            let Some(question) = session.current_question().cloned() else {
                // Empty question set: the session began finished.
                break session.summary();
            };
            ui.show_question(session.current_index() + 1, total, &question);

            loop {
                let label = ui.pick_answer(&question)?;
                match session.submit_answer(label) {
                    Ok(feedback) => {
                        ui.show_feedback(&feedback);
                        break;
                    }
                    Err(SessionError::UnknownLabel { label }) => ui.reject_answer(label),
                    Err(other) => return Err(other.into()),
                }
            }

            if let Advance::Finished(summary) = session.advance()? {
                break summary;
            }
        };

        ui.show_summary(&summary);

        let submission = summary.to_submission();
        if let Err(e) = self.sink.submit(&submission).await {
            tracing::warn!("score submission to {} failed: {e}", self.sink.name());
        }

        Ok(summary)
    }
}
