//! JWT verification
//!
//! Tokens are issued by the external identity provider; the panel only
//! validates them (HS256 shared secret, expiry, optional audience) and never
//! mints its own.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verification settings for externally-issued tokens
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret of the identity provider
    pub secret: String,
    /// Expected audience; None disables the audience check
    pub audience: Option<String>,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let audience = std::env::var("AUTH_JWT_AUDIENCE")
            .unwrap_or_else(|_| "authenticated".to_string());
        Self {
            secret: std::env::var("AUTH_JWT_SECRET").unwrap_or_default(),
            audience: if audience.is_empty() { None } else { Some(audience) },
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Claims carried by the provider's tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    /// User email, when the provider includes one
    #[serde(default)]
    pub email: String,
    /// Audience
    #[serde(default)]
    pub aud: String,
    /// Expiration timestamp
    pub exp: i64,
}

/// JWT verification errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Token verification service
#[derive(Debug, Clone)]
pub struct JwtService {
    config: JwtConfig,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Validate a bearer token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        if self.config.secret.is_empty() {
            return Err(JwtError::ConfigError("AUTH_JWT_SECRET must be set".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        match &self.config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
            _ => JwtError::InvalidToken(err.to_string()),
        })
    }

    /// Extract the raw token from an Authorization header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
