//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{AppResponse, AppResult, ok};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::enrich::BatchSnapshot;
use crate::utils::AppError;
use magazord_client::{EstoqueRow, Movimento};

fn default_limit() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    #[serde(default)]
    pub sku: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub struct EstoqueOut {
    pub items: Vec<EstoqueRow>,
}

/// Movement request; quantity is signed, negative reduces stock
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovimentoRequest {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub quantidade: f64,
    pub custo_base: Option<f64>,
    #[serde(default)]
    pub motivo: String,
}

#[derive(Debug, Deserialize)]
pub struct LoteRequest {
    #[serde(default)]
    pub skus: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LoteStarted {
    pub lote: u64,
}

/// GET /api/estoque - live stock figures for one SKU
pub async fn read(
    State(state): State<ServerState>,
    Query(query): Query<ReadQuery>,
) -> AppResult<Json<AppResponse<EstoqueOut>>> {
    if query.sku.trim().is_empty() {
        return Err(AppError::validation("sku required"));
    }
    let gateway = state.gateway()?;
    let items = gateway.fetch_inventory(&query.sku, query.limit).await?;
    Ok(ok(EstoqueOut { items }))
}

/// POST /api/estoque - submit one inventory movement (privileged)
///
/// Returns the upstream response payload verbatim.
pub async fn movement(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(request): Json<MovimentoRequest>,
) -> AppResult<Json<AppResponse<Value>>> {
    if request.sku.trim().is_empty() {
        return Err(AppError::validation("sku required"));
    }
    if request.quantidade == 0.0 {
        return Err(AppError::validation("quantidade must be non-zero"));
    }

    let gateway = state.gateway()?;
    let motivo = if request.motivo.trim().is_empty() {
        "ajuste manual".to_string()
    } else {
        request.motivo.trim().to_string()
    };

    let resposta = gateway
        .post_inventory_movement(&Movimento {
            sku: request.sku,
            quantidade: request.quantidade,
            custo_base: request.custo_base,
            motivo,
            usuario: user.audit_name().to_string(),
        })
        .await?;

    Ok(ok(resposta))
}

/// POST /api/estoque/lote - start a live enrichment batch
///
/// Returns the batch id immediately; the workers converge in the background
/// and [`batch_snapshot`] exposes the merged rows as they arrive.
pub async fn start_batch(
    State(state): State<ServerState>,
    Json(request): Json<LoteRequest>,
) -> AppResult<Json<AppResponse<LoteStarted>>> {
    let skus: Vec<String> = request
        .skus
        .iter()
        .map(|sku| sku.trim().to_string())
        .filter(|sku| !sku.is_empty())
        .collect();
    if skus.is_empty() {
        return Err(AppError::validation("skus required"));
    }

    let enrichment = state.enrichment()?;
    let lote = enrichment.start(skus);
    Ok(ok(LoteStarted { lote }))
}

/// GET /api/estoque/lote/{id} - merged rows of a running or finished batch
pub async fn batch_snapshot(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<AppResponse<BatchSnapshot>>> {
    let enrichment = state.enrichment()?;
    let snapshot = enrichment
        .snapshot(id)
        .ok_or_else(|| AppError::not_found(format!("Lote {id}")))?;
    Ok(ok(snapshot))
}
