//! Price API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::{AppResponse, AppResult, ok};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    #[serde(default)]
    pub sku: String,
}

#[derive(Debug, Serialize)]
pub struct PrecoOut {
    pub preco: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub sku: String,
    pub preco: f64,
}

/// GET /api/preco - current sell price for one SKU
pub async fn read(
    State(state): State<ServerState>,
    Query(query): Query<ReadQuery>,
) -> AppResult<Json<AppResponse<PrecoOut>>> {
    if query.sku.trim().is_empty() {
        return Err(AppError::validation("sku required"));
    }
    let gateway = state.gateway()?;
    let preco = gateway.fetch_price(&query.sku).await?;
    Ok(ok(PrecoOut { preco }))
}

/// POST /api/preco - replace the sell price for one SKU (privileged)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(request): Json<UpdateRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    if request.sku.trim().is_empty() {
        return Err(AppError::validation("sku required"));
    }

    let gateway = state.gateway()?;
    tracing::info!(
        user = %user.audit_name(),
        sku = %request.sku,
        preco = request.preco,
        "Price change submitted"
    );
    gateway.post_price(&request.sku, request.preco).await?;
    Ok(ok(()))
}
