//! Magazord connection settings
//!
//! All values come from environment variables:
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | MAGAZORD_BASE_URL | yes | API base URL, trailing slash ignored |
//! | MAGAZORD_TOKEN | yes | Basic credential user part |
//! | MAGAZORD_SECRET | yes | Basic credential secret part |
//! | MAGAZORD_LOJA_ID | no (1) | Store/tenant id in the catalog path |
//! | MAGAZORD_CDN_BASE_URL | no | Base for relative product image paths |
//! | MAGAZORD_DEPOSITO_ID | no | Default warehouse for stock operations |
//! | MAGAZORD_TABELA_PRECO_ID | no | Price list for price operations |
//!
//! Required values are only enforced when an operation needs them, so the
//! panel can start without credentials and fail fast on first use.

/// Environment-sourced Magazord credentials and defaults
#[derive(Debug, Clone, Default)]
pub struct MagazordConfig {
    /// API base URL without trailing slash
    pub base_url: String,
    /// Basic credential user part
    pub token: String,
    /// Basic credential secret part
    pub secret: String,
    /// Store/tenant id used in the catalog listing path
    pub loja_id: u32,
    /// CDN base for relative product image paths (empty = unset)
    pub cdn_base_url: String,
    /// Default warehouse for inventory queries and movements
    pub deposito_id: Option<String>,
    /// Price list used for price reads and writes
    pub tabela_preco_id: Option<String>,
}

impl MagazordConfig {
    /// Load settings from the environment, normalizing whitespace and
    /// trailing slashes
    pub fn from_env() -> Self {
        Self {
            base_url: env_trimmed("MAGAZORD_BASE_URL")
                .trim_end_matches('/')
                .to_string(),
            token: env_trimmed("MAGAZORD_TOKEN"),
            secret: env_trimmed("MAGAZORD_SECRET"),
            loja_id: std::env::var("MAGAZORD_LOJA_ID")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(1),
            cdn_base_url: env_trimmed("MAGAZORD_CDN_BASE_URL")
                .trim_end_matches('/')
                .to_string(),
            deposito_id: non_empty(env_trimmed("MAGAZORD_DEPOSITO_ID")),
            tabela_preco_id: non_empty(env_trimmed("MAGAZORD_TABELA_PRECO_ID")),
        }
    }
}

fn env_trimmed(key: &str) -> String {
    std::env::var(key).unwrap_or_default().trim().to_string()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
