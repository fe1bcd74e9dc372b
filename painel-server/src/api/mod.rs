//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`catalogo`] - mirrored catalog reads, live passthrough, sync trigger
//! - [`estoque`] - live inventory reads, movements, enrichment batches
//! - [`preco`] - live price reads and writes
//! - [`extras`] - locally-owned supplier extras
//! - [`fornecedores`] - supplier management

pub mod catalogo;
pub mod estoque;
pub mod extras;
pub mod fornecedores;
pub mod health;
pub mod preco;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult, ok};

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(catalogo::router())
        .merge(estoque::router())
        .merge(preco::router())
        .merge(extras::router())
        .merge(fornecedores::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
