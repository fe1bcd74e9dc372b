//! JWT Extractor
//!
//! Validates the bearer token once at the boundary and hands handlers a
//! [`CurrentUser`]; privileged operations receive the identity as an explicit
//! parameter instead of reading ambient session state.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse a previously validated identity on the same request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                tracing::warn!(uri = %parts.uri, "Privileged call without credentials");
                return Err(AppError::unauthorized());
            }
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(uri = %parts.uri, error = %err, "Token rejected");
                match err {
                    JwtError::ExpiredToken => Err(AppError::TokenExpired),
                    JwtError::ConfigError(msg) => Err(AppError::config(msg)),
                    JwtError::InvalidToken(msg) => Err(AppError::invalid_token(msg)),
                }
            }
        }
    }
}
