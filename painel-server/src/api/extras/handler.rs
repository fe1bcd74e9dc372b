//! Supplier extras API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::{AppResponse, AppResult, ok};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{SupplierExtraFull, SupplierExtraUpdate};
use crate::db::repository::ExtrasRepository;
use crate::utils::AppError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated SKU list
    #[serde(default)]
    pub skus: String,
}

#[derive(Debug, Serialize)]
pub struct ExtrasOut {
    pub extras: Vec<SupplierExtraFull>,
}

/// GET /api/extras?skus=a,b - extras rows for the given SKUs
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<ExtrasOut>>> {
    let skus: Vec<String> = query
        .skus
        .split(',')
        .map(str::trim)
        .filter(|sku| !sku.is_empty())
        .map(str::to_string)
        .collect();
    if skus.is_empty() {
        return Err(AppError::validation("skus required"));
    }

    let repo = ExtrasRepository::new(state.db.pool.clone());
    let extras = repo.find_for_skus(&skus).await?;
    Ok(ok(ExtrasOut { extras }))
}

/// PUT /api/extras/{sku} - upsert extras and replace the supplier
/// associations (privileged)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(sku): Path<String>,
    Json(request): Json<SupplierExtraUpdate>,
) -> AppResult<Json<AppResponse<()>>> {
    let sku = sku.trim().to_string();
    if sku.is_empty() {
        return Err(AppError::validation("invalid sku"));
    }

    let repo = ExtrasRepository::new(state.db.pool.clone());
    repo.upsert(&sku, &request).await?;
    tracing::debug!(user = %user.audit_name(), %sku, "Supplier extras updated");
    Ok(ok(()))
}
