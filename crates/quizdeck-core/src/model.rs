//! Core data model types for quizdeck.
//!
//! These are the fundamental types the entire quizdeck system uses to
//! represent questions, recorded answers, and score submissions.

use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// 1-based identifier, unique within the loaded set.
    pub id: u32,
    /// The question text shown to the player.
    #[serde(rename = "question")]
    pub text: String,
    /// Answer options in presentation order.
    pub options: Vec<QuestionOption>,
    /// Label of the correct option.
    pub correct_label: char,
    /// Shown after the question has been answered.
    #[serde(default)]
    pub explanation: String,
}

/// One answer option of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Single-character identifier, unique within the question.
    pub label: char,
    /// Option text.
    pub text: String,
}

impl Question {
    /// Look up an option by its label.
    pub fn option(&self, label: char) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.label == label)
    }

    /// Labels of all options, in presentation order.
    pub fn labels(&self) -> Vec<char> {
        self.options.iter().map(|o| o.label).collect()
    }
}

/// The outcome of answering one question. Created exactly once per answered
/// question and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Id of the answered question.
    pub question_id: u32,
    /// Snapshot of the question text at answer time.
    #[serde(rename = "question")]
    pub question_text: String,
    /// The label the player picked.
    pub selected_label: char,
    /// The label that was correct.
    pub correct_label: char,
    /// Whether the pick matched.
    pub correct: bool,
    #[serde(default)]
    pub explanation: String,
}

/// Wire payload sent to a score collector when an attempt finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub username: String,
    /// Count of correct answers.
    pub correct: u32,
    /// Number of questions in the attempt.
    pub total: u32,
    /// Wall-clock seconds from start to finish.
    pub time_taken: u64,
    /// Per-question records, in question order.
    pub breakdown: Vec<AnswerRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital_question() -> Question {
        Question {
            id: 1,
            text: "What is the capital of France?".into(),
            options: vec![
                QuestionOption {
                    label: 'a',
                    text: "London".into(),
                },
                QuestionOption {
                    label: 'b',
                    text: "Paris".into(),
                },
            ],
            correct_label: 'b',
            explanation: "Paris is the capital of France.".into(),
        }
    }

    #[test]
    fn option_lookup() {
        let q = capital_question();
        assert_eq!(q.option('a').unwrap().text, "London");
        assert_eq!(q.option('b').unwrap().text, "Paris");
        assert!(q.option('z').is_none());
    }

    #[test]
    fn labels_preserve_order() {
        let q = capital_question();
        assert_eq!(q.labels(), vec!['a', 'b']);
    }

    #[test]
    fn question_serde_roundtrip() {
        let q = capital_question();
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"question\""));
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 1);
        assert_eq!(back.correct_label, 'b');
        assert_eq!(back.options.len(), 2);
    }

    #[test]
    fn question_explanation_defaults_empty() {
        let json = r#"{
            "id": 3,
            "question": "Pick one",
            "options": [{"label": "a", "text": "this"}],
            "correct_label": "a"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.explanation, "");
    }

    #[test]
    fn submission_uses_wire_field_names() {
        let submission = ScoreSubmission {
            username: "alice".into(),
            correct: 2,
            total: 3,
            time_taken: 41,
            breakdown: vec![],
        };
        let json = serde_json::to_string(&submission).unwrap();
        assert!(json.contains("\"timeTaken\":41"));
        assert!(json.contains("\"breakdown\""));
    }
}
