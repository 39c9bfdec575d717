//! Result summaries and score-history persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{AnswerRecord, ScoreSubmission};

/// The outcome of one finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub username: String,
    /// Count of correct answers.
    pub score: u32,
    /// Number of questions in the attempt.
    pub total: u32,
    /// Wall-clock seconds from start to finish.
    pub elapsed_secs: u64,
    /// Per-question records, in question order.
    pub breakdown: Vec<AnswerRecord>,
}

impl SessionSummary {
    /// Percentage score with one meaningful decimal.
    ///
    /// A zero-question attempt scores 0.0 rather than dividing by zero.
    pub fn percent(&self) -> f64 {
        percent_of(self.score, self.total)
    }

    /// Records answered incorrectly, in question order.
    pub fn missed(&self) -> Vec<&AnswerRecord> {
        self.breakdown.iter().filter(|r| !r.correct).collect()
    }

    /// The wire payload for a score collector.
    pub fn to_submission(&self) -> ScoreSubmission {
        ScoreSubmission {
            username: self.username.clone(),
            correct: self.score,
            total: self.total,
            time_taken: self.elapsed_secs,
            breakdown: self.breakdown.clone(),
        }
    }
}

/// Percentage of `score` over `total`, with `total == 0` defined as 0.0.
pub fn percent_of(score: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(score) / f64::from(total) * 100.0
    }
}

/// One-line verdict for a finished attempt.
pub fn verdict(percent: f64) -> &'static str {
    if percent >= 100.0 {
        "Perfect score!"
    } else if percent >= 80.0 {
        "Pretty good."
    } else if percent >= 60.0 {
        "Get to studying."
    } else {
        "Keep practicing."
    }
}

/// A persisted score-history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// When the attempt finished.
    pub created_at: DateTime<Utc>,
    pub username: String,
    pub score: u32,
    pub total: u32,
    pub percent: f64,
    pub elapsed_secs: u64,
    /// Per-question records, in question order.
    pub breakdown: Vec<AnswerRecord>,
}

impl HistoryEntry {
    /// Build an entry from a score submission, stamped now.
    pub fn from_submission(submission: &ScoreSubmission) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            username: submission.username.clone(),
            score: submission.correct,
            total: submission.total,
            percent: percent_of(submission.correct, submission.total),
            elapsed_secs: submission.time_taken,
            breakdown: submission.breakdown.clone(),
        }
    }
}

/// Append an entry to the history file, creating the file and its parent
/// directory if missing.
pub fn append_history(path: &Path, entry: &HistoryEntry) -> Result<()> {
    let mut entries = if path.exists() {
        load_history(path)?
    } else {
        Vec::new()
    };
    entries.push(entry.clone());

    let json =
        serde_json::to_string_pretty(&entries).context("failed to serialize score history")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write score history to {}", path.display()))?;
    Ok(())
}

/// Load all history entries from a JSON file.
pub fn load_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read score history from {}", path.display()))?;
    let entries: Vec<HistoryEntry> =
        serde_json::from_str(&content).context("failed to parse score history JSON")?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(question_id: u32, correct: bool) -> AnswerRecord {
        AnswerRecord {
            question_id,
            question_text: format!("question {question_id}"),
            selected_label: 'a',
            correct_label: if correct { 'a' } else { 'b' },
            correct,
            explanation: String::new(),
        }
    }

    fn summary(score: u32, total: u32, breakdown: Vec<AnswerRecord>) -> SessionSummary {
        SessionSummary {
            username: "alice".into(),
            score,
            total,
            elapsed_secs: 12,
            breakdown,
        }
    }

    #[test]
    fn percent_guards_zero_total() {
        assert_eq!(percent_of(0, 0), 0.0);
        assert_eq!(percent_of(1, 2), 50.0);
        assert_eq!(percent_of(2, 2), 100.0);
    }

    #[test]
    fn missed_preserves_question_order() {
        let s = summary(1, 3, vec![record(1, false), record(2, true), record(3, false)]);
        let missed = s.missed();
        assert_eq!(missed.len(), 2);
        assert_eq!(missed[0].question_id, 1);
        assert_eq!(missed[1].question_id, 3);
    }

    #[test]
    fn submission_mirrors_summary() {
        let s = summary(1, 2, vec![record(1, true), record(2, false)]);
        let submission = s.to_submission();
        assert_eq!(submission.correct, 1);
        assert_eq!(submission.total, 2);
        assert_eq!(submission.time_taken, 12);
        assert_eq!(submission.breakdown.len(), 2);
    }

    #[test]
    fn verdict_bands() {
        assert_eq!(verdict(100.0), "Perfect score!");
        assert_eq!(verdict(80.0), "Pretty good.");
        assert_eq!(verdict(60.0), "Get to studying.");
        assert_eq!(verdict(59.9), "Keep practicing.");
        assert_eq!(verdict(0.0), "Keep practicing.");
    }

    #[test]
    fn history_entry_from_submission() {
        let s = summary(2, 2, vec![record(1, true), record(2, true)]);
        let entry = HistoryEntry::from_submission(&s.to_submission());
        assert_eq!(entry.username, "alice");
        assert_eq!(entry.score, 2);
        assert_eq!(entry.percent, 100.0);
        assert_eq!(entry.elapsed_secs, 12);
    }

    #[test]
    fn history_append_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history").join("scores.json");

        let first = HistoryEntry::from_submission(&summary(1, 2, vec![]).to_submission());
        let second = HistoryEntry::from_submission(&summary(2, 2, vec![]).to_submission());

        append_history(&path, &first).unwrap();
        append_history(&path, &second).unwrap();

        let entries = load_history(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].score, 1);
        assert_eq!(entries[1].score, 2);
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn load_history_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(load_history(&path).is_err());
    }
}
