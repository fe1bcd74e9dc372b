//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DB_PATH | painel.db | SQLite database file |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | AUTH_JWT_SECRET | (unset) | Identity provider HS256 secret |
//! | AUTH_JWT_AUDIENCE | authenticated | Expected token audience |
//! | MAGAZORD_* | see magazord-client | Upstream ERP settings |

use crate::auth::JwtConfig;
use magazord_client::MagazordConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub db_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Token verification settings
    pub jwt: JwtConfig,
    /// Upstream ERP settings
    pub magazord: MagazordConfig,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "painel.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::from_env(),
            magazord: MagazordConfig::from_env(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
