//! JSON question-file parser.
//!
//! Loads question sets from JSON files and directories, and validates them.
//! The file format keeps options as a map of label to option text:
//!
//! ```json
//! {
//!   "questions": [
//!     {
//!       "question": "What is the capital of France?",
//!       "options": { "a": "London", "b": "Paris" },
//!       "correct": "b",
//!       "explanation": "Paris is the capital of France."
//!     }
//!   ]
//! }
//! ```
//!
//! Options are presented in label order, and questions receive 1-based ids
//! in file order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionOption};

/// Intermediate structure for parsing question files.
#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<FileQuestion>,
}

#[derive(Debug, Deserialize)]
struct FileQuestion {
    question: String,
    /// Label to option text; a BTreeMap keeps presentation order stable.
    options: BTreeMap<String, String>,
    correct: String,
    #[serde(default)]
    explanation: String,
}

/// Parse a single JSON file into a question set.
pub fn load_question_file(path: &Path) -> Result<Vec<Question>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;
    parse_question_file_str(&content, path)
}

/// Parse a JSON string into a question set (useful for testing).
pub fn parse_question_file_str(content: &str, source_path: &Path) -> Result<Vec<Question>> {
    let parsed: QuestionFile = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;

    parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(idx, q)| {
            let id = idx as u32 + 1;
            let options = q
                .options
                .into_iter()
                .map(|(label, text)| {
                    Ok(QuestionOption {
                        label: parse_label(&label)
                            .with_context(|| format!("question {id}: bad option label"))?,
                        text,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Question {
                id,
                text: q.question,
                options,
                correct_label: parse_label(&q.correct)
                    .with_context(|| format!("question {id}: bad correct label"))?,
                explanation: q.explanation,
            })
        })
        .collect()
}

/// Option labels are single characters on the wire.
fn parse_label(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!("label must be a single character, got '{s}'"),
    }
}

/// Recursively load all `.json` question files from a directory.
///
/// Files that fail to parse are skipped with a warning so one bad file
/// does not hide the rest.
pub fn load_question_directory(dir: &Path) -> Result<Vec<(PathBuf, Vec<Question>)>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_question_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match load_question_file(&path) {
                Ok(set) => sets.push((path, set)),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// A warning from question-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for common issues.
///
/// The session itself trusts its input (duplicate labels in particular are
/// the data provider's responsibility); this is the tool that catches such
/// problems ahead of time.
pub fn validate_question_set(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question ids
    let mut seen_ids = std::collections::HashSet::new();
    for question in questions {
        if !seen_ids.insert(question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id),
                message: format!("duplicate question id: {}", question.id),
            });
        }
    }

    for question in questions {
        // Duplicate option labels within one question
        let mut seen_labels = std::collections::HashSet::new();
        for option in &question.options {
            if !seen_labels.insert(option.label) {
                warnings.push(ValidationWarning {
                    question_id: Some(question.id),
                    message: format!("duplicate option label: '{}'", option.label),
                });
            }
            if option.text.trim().is_empty() {
                warnings.push(ValidationWarning {
                    question_id: Some(question.id),
                    message: format!("option '{}' has empty text", option.label),
                });
            }
        }

        if question.option(question.correct_label).is_none() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id),
                message: format!(
                    "correct label '{}' is not among the options",
                    question.correct_label
                ),
            });
        }

        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id),
                message: "question text is empty".into(),
            });
        }
    }

    if questions.len() < 5 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!("set has only {} questions, expected at least 5", questions.len()),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_JSON: &str = r#"{
        "questions": [
            {
                "question": "What is the capital of France?",
                "options": { "c": "Paris", "a": "London", "b": "Berlin" },
                "correct": "c",
                "explanation": "Paris is the capital of France."
            },
            {
                "question": "Which planet is known as the Red Planet?",
                "options": { "a": "Venus", "b": "Mars" },
                "correct": "b"
            }
        ]
    }"#;

    #[test]
    fn parse_valid_file() {
        let questions =
            parse_question_file_str(VALID_JSON, &PathBuf::from("test.json")).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[0].correct_label, 'c');
        assert_eq!(questions[1].id, 2);
        assert_eq!(questions[1].explanation, "");
    }

    #[test]
    fn options_come_out_in_label_order() {
        let questions =
            parse_question_file_str(VALID_JSON, &PathBuf::from("test.json")).unwrap();
        assert_eq!(questions[0].labels(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn multi_character_label_rejected() {
        let json = r#"{
            "questions": [
                {
                    "question": "Pick one",
                    "options": { "ab": "first" },
                    "correct": "ab"
                }
            ]
        }"#;
        let err = parse_question_file_str(json, &PathBuf::from("test.json")).unwrap_err();
        assert!(format!("{err:#}").contains("single character"));
    }

    #[test]
    fn malformed_json_rejected() {
        let result = parse_question_file_str("{ nope", &PathBuf::from("bad.json"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory_collects_json_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quiz.json"), VALID_JSON).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let sets = load_question_directory(dir.path()).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].1.len(), 2);
    }

    fn question(id: u32, labels: &[char], correct: char) -> Question {
        Question {
            id,
            text: format!("question {id}"),
            options: labels
                .iter()
                .map(|&label| crate::model::QuestionOption {
                    label,
                    text: format!("option {label}"),
                })
                .collect(),
            correct_label: correct,
            explanation: String::new(),
        }
    }

    #[test]
    fn validate_clean_set_warns_only_about_size() {
        let questions = vec![question(1, &['a', 'b'], 'a'), question(2, &['a', 'b'], 'b')];
        let warnings = validate_question_set(&questions);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("at least 5"));
    }

    #[test]
    fn validate_duplicate_ids() {
        let questions = vec![question(7, &['a'], 'a'), question(7, &['a'], 'a')];
        let warnings = validate_question_set(&questions);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question id")));
    }

    #[test]
    fn validate_duplicate_option_labels() {
        let questions = vec![question(1, &['a', 'a'], 'a')];
        let warnings = validate_question_set(&questions);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate option label")));
    }

    #[test]
    fn validate_correct_label_must_exist() {
        let questions = vec![question(1, &['a', 'b'], 'z')];
        let warnings = validate_question_set(&questions);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("not among the options")));
    }

    #[test]
    fn validate_empty_texts() {
        let mut q = question(1, &['a'], 'a');
        q.text = "  ".into();
        q.options[0].text = "".into();
        let warnings = validate_question_set(&[q]);
        assert!(warnings.iter().any(|w| w.message.contains("question text is empty")));
        assert!(warnings.iter().any(|w| w.message.contains("empty text")));
    }
}
