//! Session and collaborator error types.
//!
//! Both taxonomies live in `quizdeck-core` so the session driver can
//! classify failures without string matching: `SessionError` covers the
//! state machine's own rejections, `SourceError` covers question sources
//! and score sinks.

use thiserror::Error;

use crate::session::SessionPhase;

/// Errors raised by quiz session operations.
///
/// Every variant leaves the session exactly as it was before the failed
/// operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The username was empty or whitespace.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The submitted label matches none of the current question's options.
    #[error("no option labelled '{label}' on the current question")]
    UnknownLabel { label: char },

    /// The operation is not valid in the session's current phase.
    #[error("{operation} is not valid while the session is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: SessionPhase,
    },
}

/// Errors raised by question sources and score sinks.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The collaborator answered with a non-"ok" status envelope.
    #[error("{0}")]
    Rejected(String),

    /// The payload could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The collaborator returned an HTTP error status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// A local file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_messages() {
        assert_eq!(
            SessionError::EmptyUsername.to_string(),
            "username must not be empty"
        );
        assert_eq!(
            SessionError::UnknownLabel { label: 'z' }.to_string(),
            "no option labelled 'z' on the current question"
        );
        assert_eq!(
            SessionError::InvalidPhase {
                operation: "advance",
                phase: SessionPhase::Active,
            }
            .to_string(),
            "advance is not valid while the session is active"
        );
    }

    #[test]
    fn source_error_messages() {
        assert_eq!(
            SourceError::Rejected("question bank unavailable".into()).to_string(),
            "question bank unavailable"
        );
        assert!(SourceError::Api {
            status: 500,
            message: "boom".into(),
        }
        .to_string()
        .contains("HTTP 500"));
    }
}
