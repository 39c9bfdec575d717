//! Mock collaborators for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizdeck_core::error::SourceError;
use quizdeck_core::model::{Question, QuestionOption, ScoreSubmission};
use quizdeck_core::traits::{QuestionSource, ScoreSink};

/// A mock question source for driving sessions without a server or files.
pub struct MockQuestionSource {
    questions: Vec<Question>,
    /// When set, every fetch fails with this rejection instead.
    failure: Option<String>,
    call_count: AtomicU32,
}

impl MockQuestionSource {
    /// Create a mock that returns the given question set.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            failure: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock that always fails with the given rejection message.
    pub fn failing(message: &str) -> Self {
        Self {
            questions: Vec::new(),
            failure: Some(message.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches made against this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuestionSource for MockQuestionSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<Vec<Question>, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.failure {
            Some(message) => Err(SourceError::Rejected(message.clone())),
            None => Ok(self.questions.clone()),
        }
    }
}

/// A mock score sink that captures every submission it receives.
pub struct MockScoreSink {
    submissions: Mutex<Vec<ScoreSubmission>>,
    failure: Option<String>,
}

impl MockScoreSink {
    pub fn new() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Create a sink that rejects every submission.
    pub fn failing(message: &str) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    /// Submissions received so far.
    pub fn submissions(&self) -> Vec<ScoreSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

impl Default for MockScoreSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoreSink for MockScoreSink {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit(&self, submission: &ScoreSubmission) -> Result<(), SourceError> {
        if let Some(message) = &self.failure {
            return Err(SourceError::Rejected(message.clone()));
        }
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

/// Two-question fixture (correct answers "a" then "b") shared by the
/// integration tests.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            text: "first question".into(),
            options: vec![
                QuestionOption {
                    label: 'a',
                    text: "alpha".into(),
                },
                QuestionOption {
                    label: 'b',
                    text: "beta".into(),
                },
            ],
            correct_label: 'a',
            explanation: "alpha was right".into(),
        },
        Question {
            id: 2,
            text: "second question".into(),
            options: vec![
                QuestionOption {
                    label: 'a',
                    text: "alpha".into(),
                },
                QuestionOption {
                    label: 'b',
                    text: "beta".into(),
                },
            ],
            correct_label: 'b',
            explanation: "beta was right".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_source_counts_calls() {
        let source = MockQuestionSource::new(sample_questions());
        source.fetch().await.unwrap();
        source.fetch().await.unwrap();
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_source_rejects() {
        let source = MockQuestionSource::failing("nope");
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn mock_sink_captures_submissions() {
        let sink = MockScoreSink::new();
        let submission = ScoreSubmission {
            username: "alice".into(),
            correct: 1,
            total: 2,
            time_taken: 5,
            breakdown: vec![],
        };
        sink.submit(&submission).await.unwrap();
        assert_eq!(sink.submissions().len(), 1);
        assert_eq!(sink.submissions()[0].username, "alice");
    }
}
