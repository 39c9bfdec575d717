//! quizdeck-providers — Question sources and score sinks.
//!
//! Implements the `QuestionSource` and `ScoreSink` traits for a remote
//! quiz server, local question files, and a local score-history file,
//! plus mocks for testing.

pub mod config;
pub mod file;
pub mod mock;
pub mod server;

pub use config::{create_collaborators, load_config, QuizdeckConfig, SourceConfig};
