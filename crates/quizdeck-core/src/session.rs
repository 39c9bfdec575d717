//! The quiz session state machine.
//!
//! One [`QuizSession`] value owns the complete state of a single attempt:
//! the loaded questions, the cursor, the score, and the answer records. A
//! new attempt is a new value; nothing here is shared or global. Transitions
//! that are invalid in the current phase are rejected without mutating
//! anything.

use std::fmt;
use std::time::Instant;

use crate::error::SessionError;
use crate::model::{AnswerRecord, Question};
use crate::report::SessionSummary;

/// Phase of a quiz attempt.
///
/// The pre-load phases (idle, loading) exist only in the driver; a session
/// value is constructed once the question set has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A question is current and awaiting an answer.
    Active,
    /// Feedback for the current question is shown, awaiting advance.
    Answered,
    /// The attempt is complete; terminal.
    Finished,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Active => write!(f, "active"),
            SessionPhase::Answered => write!(f, "answered"),
            SessionPhase::Finished => write!(f, "finished"),
        }
    }
}

/// Feedback produced when an answer is accepted. Once this exists the
/// current question is locked.
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// Revealed so an incorrect pick can show the right answer.
    pub correct_label: char,
    pub explanation: String,
}

/// Result of advancing past an answered question.
#[derive(Debug)]
pub enum Advance {
    /// Another question is waiting.
    Next,
    /// The attempt is complete.
    Finished(SessionSummary),
}

/// One quiz attempt from first question to summary.
#[derive(Debug)]
pub struct QuizSession {
    username: String,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    records: Vec<AnswerRecord>,
    started_at: Instant,
    phase: SessionPhase,
}

impl QuizSession {
    /// Begin a fresh attempt over `questions`.
    ///
    /// The username must contain at least one non-whitespace character. An
    /// empty question set begins directly in [`SessionPhase::Finished`] with
    /// a total of zero.
    pub fn begin(
        username: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, SessionError> {
        let username = username.into();
        let username = username.trim();
        if username.is_empty() {
            return Err(SessionError::EmptyUsername);
        }

        let phase = if questions.is_empty() {
            SessionPhase::Finished
        } else {
            SessionPhase::Active
        };

        Ok(Self {
            username: username.to_string(),
            questions,
            current_index: 0,
            score: 0,
            records: Vec::new(),
            started_at: Instant::now(),
            phase,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Count of correct answers so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of questions in the attempt.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based position of the current question.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Records for every question answered so far, in question order.
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    /// The question currently shown, or `None` once the attempt finished.
    ///
    /// Read-only: repeated calls never change anything.
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == SessionPhase::Finished {
            None
        } else {
            self.questions.get(self.current_index)
        }
    }

    /// Answer the current question.
    ///
    /// Valid only while [`SessionPhase::Active`]. A label that matches none
    /// of the current question's options is rejected with no record created,
    /// no score change, and no transition. An accepted answer appends its
    /// [`AnswerRecord`], bumps the score on a match with the correct label,
    /// and locks the question by moving to [`SessionPhase::Answered`].
    pub fn submit_answer(&mut self, label: char) -> Result<AnswerFeedback, SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(SessionError::InvalidPhase {
                operation: "submit_answer",
                phase: self.phase,
            });
        }

        let question = &self.questions[self.current_index];
        if question.option(label).is_none() {
            return Err(SessionError::UnknownLabel { label });
        }

        let correct = label == question.correct_label;
        self.records.push(AnswerRecord {
            question_id: question.id,
            question_text: question.text.clone(),
            selected_label: label,
            correct_label: question.correct_label,
            correct,
            explanation: question.explanation.clone(),
        });
        if correct {
            self.score += 1;
        }
        self.phase = SessionPhase::Answered;

        Ok(AnswerFeedback {
            correct,
            correct_label: question.correct_label,
            explanation: question.explanation.clone(),
        })
    }

    /// Move past the answered question.
    ///
    /// Valid only while [`SessionPhase::Answered`]; rejected elsewhere with
    /// no side effects. Past the last question the session transitions to
    /// [`SessionPhase::Finished`] and yields the summary.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if self.phase != SessionPhase::Answered {
            return Err(SessionError::InvalidPhase {
                operation: "advance",
                phase: self.phase,
            });
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.phase = SessionPhase::Active;
            Ok(Advance::Next)
        } else {
            self.phase = SessionPhase::Finished;
            Ok(Advance::Finished(self.summary()))
        }
    }

    /// Compute the result summary for the attempt so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            username: self.username.clone(),
            score: self.score,
            total: self.questions.len() as u32,
            elapsed_secs: self.elapsed_secs(),
            breakdown: self.records.clone(),
        }
    }

    /// Wall-clock seconds since the attempt began, rounded to the nearest
    /// whole second.
    pub fn elapsed_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs_f64().round() as u64
    }
}
