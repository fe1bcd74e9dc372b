//! Gateway error types

use thiserror::Error;

/// Upstream error bodies are truncated to this many characters before being
/// surfaced to callers.
pub const ERROR_BODY_LIMIT: usize = 500;

/// Gateway error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required configuration is missing; raised before any network I/O
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input rejected before any network I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream answered with a non-success status
    #[error("Magazord returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport-level failure (connect, timeout, body read)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Whether the upstream throttled the request (HTTP 429)
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GatewayError::Upstream { status: 429, .. })
    }

    /// Build an upstream error with the body truncated to [`ERROR_BODY_LIMIT`]
    pub(crate) fn upstream(status: u16, body: &str) -> Self {
        GatewayError::Upstream {
            status,
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
