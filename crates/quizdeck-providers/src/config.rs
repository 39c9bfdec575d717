//! Configuration loading and collaborator factories.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdeck_core::traits::{QuestionSource, ScoreSink};

use crate::file::{FileQuestionSource, HistorySink};
use crate::server::HttpQuizServer;

/// Configuration for a single named question source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Remote quiz server speaking the JSON envelope API.
    Server {
        base_url: String,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
    /// Local JSON question file.
    File {
        path: PathBuf,
        #[serde(default)]
        shuffle: bool,
    },
}

/// Top-level quizdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Source configurations keyed by name.
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,
    /// Source used when none is named on the command line.
    #[serde(default = "default_source")]
    pub default_source: String,
    /// Player name used when none is given.
    #[serde(default)]
    pub default_username: Option<String>,
    /// Where offline attempts record their scores.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

fn default_source() -> String {
    "local".to_string()
}

fn default_history_path() -> PathBuf {
    PathBuf::from("./score_history.json")
}

impl Default for QuizdeckConfig {
    fn default() -> Self {
        Self {
            sources: HashMap::new(),
            default_source: default_source(),
            default_username: None,
            history_path: default_history_path(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Server {
            base_url,
            timeout_secs,
        } => SourceConfig::Server {
            base_url: resolve_env_vars(base_url),
            timeout_secs: *timeout_secs,
        },
        SourceConfig::File { path, shuffle } => SourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
            shuffle: *shuffle,
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// `QUIZDECK_SERVER_URL` overrides the `server` source's base URL.
pub fn load_config() -> Result<QuizdeckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizdeckConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("QUIZDECK_SERVER_URL") {
        config.sources.insert(
            "server".into(),
            SourceConfig::Server {
                base_url: url,
                timeout_secs: None,
            },
        );
    }

    // Resolve env vars in all source configs
    let resolved: HashMap<String, SourceConfig> = config
        .sources
        .iter()
        .map(|(k, v)| (k.clone(), resolve_source_config(v)))
        .collect();
    config.sources = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}

/// Create the question source and score sink for a source configuration.
///
/// A server serves both roles; a file source pairs with the local history
/// sink at `history_path`.
pub fn create_collaborators(
    config: &SourceConfig,
    history_path: &Path,
) -> Result<(Arc<dyn QuestionSource>, Arc<dyn ScoreSink>)> {
    match config {
        SourceConfig::Server {
            base_url,
            timeout_secs,
        } => {
            anyhow::ensure!(!base_url.is_empty(), "server source has no base_url");
            let server = Arc::new(match timeout_secs {
                Some(secs) => HttpQuizServer::with_timeout(base_url, Duration::from_secs(*secs)),
                None => HttpQuizServer::new(base_url),
            });
            Ok((server.clone(), server))
        }
        SourceConfig::File { path, shuffle } => Ok((
            Arc::new(FileQuestionSource::with_shuffle(path, *shuffle)),
            Arc::new(HistorySink::new(history_path)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZDECK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZDECK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZDECK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZDECK_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizdeckConfig::default();
        assert_eq!(config.default_source, "local");
        assert_eq!(config.history_path, PathBuf::from("./score_history.json"));
        assert!(config.default_username.is_none());
    }

    #[test]
    fn parse_source_configs() {
        let toml_str = r#"
[sources.local]
type = "file"
path = "questions/sample.json"
shuffle = true

[sources.server]
type = "server"
base_url = "http://127.0.0.1:5000"
timeout_secs = 10

default_source = "local"
default_username = "alice"
history_path = "./scores.json"
"#;
        let config: QuizdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert!(matches!(
            config.sources.get("local"),
            Some(SourceConfig::File { shuffle: true, .. })
        ));
        assert!(matches!(
            config.sources.get("server"),
            Some(SourceConfig::Server {
                timeout_secs: Some(10),
                ..
            })
        ));
        assert_eq!(config.default_username.as_deref(), Some("alice"));
    }

    #[test]
    fn collaborators_for_file_source() {
        let config = SourceConfig::File {
            path: PathBuf::from("quiz.json"),
            shuffle: false,
        };
        let (source, sink) =
            create_collaborators(&config, Path::new("./scores.json")).unwrap();
        assert_eq!(source.name(), "file");
        assert_eq!(sink.name(), "history");
    }

    #[test]
    fn collaborators_for_server_source() {
        let config = SourceConfig::Server {
            base_url: "http://127.0.0.1:5000".into(),
            timeout_secs: None,
        };
        let (source, sink) =
            create_collaborators(&config, Path::new("./scores.json")).unwrap();
        assert_eq!(source.name(), "server");
        assert_eq!(sink.name(), "server");
    }

    #[test]
    fn server_without_base_url_rejected() {
        let config = SourceConfig::Server {
            base_url: String::new(),
            timeout_secs: None,
        };
        assert!(create_collaborators(&config, Path::new("./scores.json")).is_err());
    }
}
