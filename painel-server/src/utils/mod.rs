//! Utility module - shared types and helpers
//!
//! - [`AppError`] - application error type
//! - [`AppResponse`] - API response envelope
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, ok};
pub use result::AppResult;

/// API response envelope
///
/// Every endpoint answers with this shape; `success=false` carries the error
/// message, `success=true` carries the payload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    /// Successful response carrying a payload
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed response carrying a message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
