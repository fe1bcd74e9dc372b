//! Authentication
//!
//! Identity is owned by an external provider; this module only verifies the
//! bearer tokens it issues and exposes the caller as a [`CurrentUser`]
//! extractor for privileged handlers.

mod extractor;
pub mod jwt;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

/// Verified caller identity, threaded explicitly into privileged operations
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

impl CurrentUser {
    /// Identity string recorded in upstream audit observations
    pub fn audit_name(&self) -> &str {
        if self.email.is_empty() {
            &self.id
        } else {
            &self.email
        }
    }
}
