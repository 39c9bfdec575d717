//! quizdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Multiple-choice quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz
    Play {
        /// Named source from the config file
        #[arg(long)]
        source: Option<String>,

        /// Quiz server base URL (overrides config)
        #[arg(long)]
        server: Option<String>,

        /// Local question file (overrides config)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Player name (prompted when omitted)
        #[arg(long)]
        username: Option<String>,

        /// Shuffle questions and options (file sources only)
        #[arg(long)]
        shuffle: bool,

        /// Score history file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question files
    Validate {
        /// Path to a question .json file or directory
        #[arg(long)]
        questions: PathBuf,
    },

    /// Show recorded scores
    History {
        /// Score history file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Show at most this many entries, newest first
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample questions
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            source,
            server,
            questions,
            username,
            shuffle,
            history,
            config,
        } => {
            commands::play::execute(source, server, questions, username, shuffle, history, config)
                .await
        }
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::History {
            history,
            limit,
            config,
        } => commands::history::execute(history, limit, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
