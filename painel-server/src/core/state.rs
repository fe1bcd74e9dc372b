//! Server state - shared service handles

use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::enrich::EnrichmentService;
use crate::utils::{AppError, AppResult};
use magazord_client::MagazordClient;

/// Shared server state
///
/// Cheap to clone; every service sits behind an `Arc`. The Magazord gateway
/// is optional so the panel can come up without ERP credentials — operations
/// that need it fail with a configuration error instead.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    gateway: Option<Arc<MagazordClient>>,
    enrichment: Option<Arc<EnrichmentService>>,
}

impl ServerState {
    /// Open the database and wire up the services
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.db_path).await?;
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

        let gateway = match MagazordClient::new(config.magazord.clone()) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                tracing::warn!(error = %err, "Magazord gateway not configured; ERP operations unavailable");
                None
            }
        };
        let enrichment = gateway
            .as_ref()
            .map(|gateway| Arc::new(EnrichmentService::new(gateway.clone())));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            gateway,
            enrichment,
        })
    }

    /// The ERP gateway, or a configuration error when credentials are missing
    pub fn gateway(&self) -> AppResult<Arc<MagazordClient>> {
        self.gateway.clone().ok_or_else(Self::gateway_unconfigured)
    }

    /// The enrichment pool, or a configuration error when the gateway is
    /// missing
    pub fn enrichment(&self) -> AppResult<Arc<EnrichmentService>> {
        self.enrichment
            .clone()
            .ok_or_else(Self::gateway_unconfigured)
    }

    /// The enrichment pool when available, for background maintenance
    pub fn enrichment_opt(&self) -> Option<Arc<EnrichmentService>> {
        self.enrichment.clone()
    }

    fn gateway_unconfigured() -> AppError {
        AppError::config("MAGAZORD_BASE_URL, MAGAZORD_TOKEN and MAGAZORD_SECRET must be set")
    }
}
