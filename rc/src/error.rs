//! RagEngine client error types

use thiserror::Error;

/// Errors that can occur while talking to a RagEngine service
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Check if this error is plausibly transient and worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Api { status, .. } => matches!(status, 408 | 429) || *status >= 500,
            ClientError::Network(_) => true,
            ClientError::Json(_) => false,
            ClientError::InvalidRequest(_) => false,
        }
    }
}
