//! Local question files and score history.
//!
//! `FileQuestionSource` serves the same role as the remote server's
//! question endpoint for offline play, including its per-attempt shuffling
//! of question and option order. `HistorySink` is the matching score
//! collector, appending finished attempts to the local history file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::seq::SliceRandom;

use quizdeck_core::error::SourceError;
use quizdeck_core::model::{Question, ScoreSubmission};
use quizdeck_core::parser;
use quizdeck_core::report::{append_history, HistoryEntry};
use quizdeck_core::traits::{QuestionSource, ScoreSink};

/// Question source backed by a local JSON file.
pub struct FileQuestionSource {
    path: PathBuf,
    shuffle: bool,
}

impl FileQuestionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            shuffle: false,
        }
    }

    /// Shuffling randomizes question order and option order per fetch and
    /// renumbers ids, so repeat attempts cannot be answered from memory of
    /// positions.
    pub fn with_shuffle(path: impl Into<PathBuf>, shuffle: bool) -> Self {
        Self {
            path: path.into(),
            shuffle,
        }
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<Question>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut questions = parser::parse_question_file_str(&content, &self.path)
            .map_err(|e| SourceError::Malformed(format!("{e:#}")))?;

        if self.shuffle {
            let mut rng = rand::thread_rng();
            questions.shuffle(&mut rng);
            for question in &mut questions {
                question.options.shuffle(&mut rng);
            }
            // Ids are 1-based in presentation order.
            for (idx, question) in questions.iter_mut().enumerate() {
                question.id = idx as u32 + 1;
            }
        }

        Ok(questions)
    }
}

/// Score sink that appends finished attempts to the local history file.
pub struct HistorySink {
    path: PathBuf,
}

impl HistorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ScoreSink for HistorySink {
    fn name(&self) -> &str {
        "history"
    }

    async fn submit(&self, submission: &ScoreSubmission) -> Result<(), SourceError> {
        let entry = HistoryEntry::from_submission(submission);
        append_history(&self.path, &entry).map_err(|e| SourceError::Malformed(format!("{e:#}")))
    }
}
