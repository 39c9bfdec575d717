//! HTTP quiz-server client.
//!
//! Speaks the server's JSON envelope API: `GET /api/questions` to load a
//! question set, `POST /api/score` to record a finished attempt. Both
//! responses carry `{status: "ok" | "error", message?: ...}`; a non-"ok"
//! status is surfaced with the server's message as the reason.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use quizdeck_core::error::SourceError;
use quizdeck_core::model::{Question, ScoreSubmission};
use quizdeck_core::traits::{QuestionSource, ScoreSink};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const STATUS_OK: &str = "ok";
const DEFAULT_REJECTION: &str = "quiz server reported an error";

/// Client for a quiz server; acts as both question source and score sink.
pub struct HttpQuizServer {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpQuizServer {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_secs(),
            client,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout(self.timeout_secs)
        } else {
            SourceError::Network(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
    status: String,
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ScoreEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

fn rejection(message: Option<String>) -> SourceError {
    SourceError::Rejected(message.unwrap_or_else(|| DEFAULT_REJECTION.to_string()))
}

#[async_trait]
impl QuestionSource for HttpQuizServer {
    fn name(&self) -> &str {
        "server"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self) -> Result<Vec<Question>, SourceError> {
        let response = self
            .client
            .get(format!("{}/api/questions", self.base_url))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        if status >= 400 {
            // The server wraps failures in the envelope even on error
            // statuses; prefer its message when it decodes.
            let body = response.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<QuestionsEnvelope>(&body) {
                if envelope.status != STATUS_OK {
                    return Err(rejection(envelope.message));
                }
            }
            return Err(SourceError::Api {
                status,
                message: body,
            });
        }

        let envelope: QuestionsEnvelope = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        if envelope.status != STATUS_OK {
            return Err(rejection(envelope.message));
        }

        Ok(envelope.questions)
    }
}

#[async_trait]
impl ScoreSink for HttpQuizServer {
    fn name(&self) -> &str {
        "server"
    }

    #[instrument(skip(self, submission), fields(base_url = %self.base_url, username = %submission.username))]
    async fn submit(&self, submission: &ScoreSubmission) -> Result<(), SourceError> {
        let response = self
            .client
            .post(format!("{}/api/score", self.base_url))
            .json(submission)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<ScoreEnvelope>(&body) {
                if envelope.status != STATUS_OK {
                    return Err(rejection(envelope.message));
                }
            }
            return Err(SourceError::Api {
                status,
                message: body,
            });
        }

        let envelope: ScoreEnvelope = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        if envelope.status != STATUS_OK {
            return Err(rejection(envelope.message));
        }

        Ok(())
    }
}
