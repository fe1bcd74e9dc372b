//! Health check

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::api::{AppResponse, ok};
use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - liveness
async fn health() -> Json<AppResponse<Health>> {
    ok(Health { status: "ok" })
}
