//! The `quizdeck play` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdeck_core::engine::{SessionDriver, SessionUi};
use quizdeck_core::model::Question;
use quizdeck_core::report::{verdict, SessionSummary};
use quizdeck_core::session::AnswerFeedback;
use quizdeck_providers::config::{create_collaborators, load_config_from, SourceConfig};

/// Terminal front end for a running attempt.
struct ConsoleUi;

impl ConsoleUi {
    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        if read == 0 {
            anyhow::bail!("input closed before the quiz finished");
        }
        Ok(line.trim().to_string())
    }
}

impl SessionUi for ConsoleUi {
    fn show_question(&mut self, position: usize, total: usize, question: &Question) {
        println!();
        println!("Question {position} of {total}:");
        println!("{}", question.text);
        println!();
        for option in &question.options {
            println!("  {}) {}", option.label, option.text);
        }
        println!();
    }

    fn pick_answer(&mut self, question: &Question) -> Result<char> {
        let labels = question
            .labels()
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        loop {
            print!("Your answer: ");
            std::io::stdout().flush()?;
            let answer = self.read_line()?.to_lowercase();

            let mut chars = answer.chars();
            match (chars.next(), chars.next()) {
                (Some(label), None) => return Ok(label),
                _ => println!("Invalid input. Please enter one of: {labels}"),
            }
        }
    }

    fn reject_answer(&mut self, label: char) {
        println!("No option '{label}' on this question. Try again.");
    }

    fn show_feedback(&mut self, feedback: &AnswerFeedback) {
        if feedback.correct {
            println!("Correct!");
        } else {
            println!(
                "Incorrect. The correct answer was '{}'.",
                feedback.correct_label
            );
        }
        if !feedback.explanation.is_empty() {
            println!("Explanation: {}", feedback.explanation);
        }
    }

    fn show_summary(&mut self, summary: &SessionSummary) {
        let percent = summary.percent();
        println!();
        println!("QUIZ COMPLETE");
        println!(
            "{}, your final score: {}/{} ({percent:.1}%)",
            summary.username, summary.score, summary.total
        );
        println!("Time taken: {}s", summary.elapsed_secs);
        println!("{}", verdict(percent));

        let missed = summary.missed();
        if !missed.is_empty() {
            println!();
            println!("Review these:");
            for record in missed {
                println!(
                    "  {} (answered '{}', correct '{}')",
                    record.question_text, record.selected_label, record.correct_label
                );
            }
        }
    }
}

pub async fn execute(
    source_name: Option<String>,
    server: Option<String>,
    questions: Option<PathBuf>,
    username: Option<String>,
    shuffle: bool,
    history: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let history_path = history.unwrap_or_else(|| config.history_path.clone());

    let mut source_config = if let Some(base_url) = server {
        SourceConfig::Server {
            base_url,
            timeout_secs: None,
        }
    } else if let Some(path) = questions {
        SourceConfig::File { path, shuffle }
    } else {
        let name = source_name.unwrap_or_else(|| config.default_source.clone());
        config.sources.get(&name).cloned().with_context(|| {
            format!(
                "source '{name}' not found in config. Available: {:?}",
                config.sources.keys().collect::<Vec<_>>()
            )
        })?
    };

    if shuffle {
        if let SourceConfig::File {
            shuffle: configured, ..
        } = &mut source_config
        {
            *configured = true;
        }
    }

    let (source, sink) = create_collaborators(&source_config, &history_path)?;

    let username = match username.or_else(|| config.default_username.clone()) {
        Some(name) => name,
        None => prompt_username()?,
    };

    let driver = SessionDriver::new(source, sink);
    let mut ui = ConsoleUi;
    driver.run(&username, &mut ui).await?;

    Ok(())
}

fn prompt_username() -> Result<String> {
    print!("Enter your name: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
