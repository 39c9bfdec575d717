//! The `quizdeck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_core::parser;

pub fn execute(questions: PathBuf) -> Result<()> {
    let sets = if questions.is_dir() {
        parser::load_question_directory(&questions)?
    } else {
        let set = parser::load_question_file(&questions)?;
        vec![(questions, set)]
    };

    anyhow::ensure!(!sets.is_empty(), "no question files found");

    let mut total_warnings = 0usize;
    for (path, set) in &sets {
        println!("{}: {} questions", path.display(), set.len());
        let warnings = parser::validate_question_set(set);
        for warning in &warnings {
            match warning.question_id {
                Some(id) => println!("  warning (question {id}): {}", warning.message),
                None => println!("  warning: {}", warning.message),
            }
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question files valid");
    } else {
        println!("{total_warnings} warning(s)");
    }

    Ok(())
}
