// Rust guideline compliant 2026-02-06

//! Error types for the Quorum core library.

use thiserror::Error;

/// Result type alias for Quorum operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Quorum operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Issue payload missing required data.
    #[error("Malformed issue: {0}")]
    MalformedIssue(String),

    /// Transport-level failure reported by the tracker adapter.
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status code, if the failure carried one.
        status: Option<u16>,
        /// Human-readable description, including server error messages.
        message: String,
    },
}

impl Error {
    /// Creates a transport error with an HTTP status code.
    pub fn transport(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: format!("HTTP {}: {}", status, message.into()),
        }
    }

    /// Creates a transport error without an HTTP status (network-level failure).
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }
}
