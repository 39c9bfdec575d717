//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdeck.toml
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    // Create sample question file
    std::fs::create_dir_all("questions")?;
    let sample_path = std::path::Path::new("questions/sample.json");
    if sample_path.exists() {
        println!("questions/sample.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_QUESTIONS)?;
        println!("Created questions/sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizdeck validate --questions questions/sample.json");
    println!("  2. Run: quizdeck play");
    println!("  3. Run: quizdeck history");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

[sources.local]
type = "file"
path = "questions/sample.json"
shuffle = true

[sources.server]
type = "server"
base_url = "${QUIZDECK_SERVER_URL}"

default_source = "local"
history_path = "./score_history.json"
"#;

const SAMPLE_QUESTIONS: &str = r#"{
  "questions": [
    {
      "question": "What is the capital of France?",
      "options": {
        "a": "London",
        "b": "Berlin",
        "c": "Paris",
        "d": "Madrid"
      },
      "correct": "c",
      "explanation": "Paris is the capital and largest city of France."
    },
    {
      "question": "Which planet is known as the Red Planet?",
      "options": {
        "a": "Venus",
        "b": "Mars",
        "c": "Jupiter",
        "d": "Saturn"
      },
      "correct": "b",
      "explanation": "Iron oxide on the surface of Mars gives it a reddish appearance."
    },
    {
      "question": "What is the largest ocean on Earth?",
      "options": {
        "a": "Atlantic Ocean",
        "b": "Indian Ocean",
        "c": "Arctic Ocean",
        "d": "Pacific Ocean"
      },
      "correct": "d",
      "explanation": "The Pacific is the largest and deepest of Earth's oceans."
    },
    {
      "question": "Who wrote 'Romeo and Juliet'?",
      "options": {
        "a": "Charles Dickens",
        "b": "William Shakespeare",
        "c": "Jane Austen",
        "d": "Mark Twain"
      },
      "correct": "b",
      "explanation": "Shakespeare wrote 'Romeo and Juliet' in the 1590s."
    },
    {
      "question": "What is the chemical symbol for gold?",
      "options": {
        "a": "Go",
        "b": "Gd",
        "c": "Au",
        "d": "Ag"
      },
      "correct": "c",
      "explanation": "Gold's symbol Au comes from the Latin aurum."
    }
  ]
}
"#;
