//! Catalog API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::{AppResponse, AppResult, ok};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::CatalogEntry;
use crate::db::repository::{CatalogFilter, CatalogRepository};
use crate::sync::CatalogSync;
use magazord_client::{CatalogoRow, clamp_limit, clamp_page};

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring over sku and name
    pub busca: Option<String>,
    /// Supplier name or external supplier code
    pub fornecedor: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogoPage {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub itens: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivePage {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub has_more: bool,
    pub catalogo: Vec<CatalogoRow>,
}

#[derive(Debug, Serialize)]
pub struct SyncOutcome {
    pub total: u64,
}

/// GET /api/catalogo - filtered page of the mirrored catalog
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<CatalogoPage>>> {
    let repo = CatalogRepository::new(state.db.pool.clone());
    let filter = CatalogFilter {
        busca: query.busca,
        fornecedor: query.fornecedor,
        page: clamp_page(query.page),
        limit: clamp_limit(query.limit),
    };
    let (itens, total) = repo.search(&filter).await?;

    Ok(ok(CatalogoPage {
        page: filter.page,
        limit: filter.limit,
        total,
        itens,
    }))
}

/// GET /api/catalogo/magazord - live paginated passthrough of the ERP listing
pub async fn list_live(
    State(state): State<ServerState>,
    Query(query): Query<LiveQuery>,
) -> AppResult<Json<AppResponse<LivePage>>> {
    let gateway = state.gateway()?;
    let listagem = gateway.list_catalog_page(query.page, query.limit).await?;
    let catalogo = gateway.map_derivacoes(&listagem.items);

    Ok(ok(LivePage {
        page: clamp_page(query.page),
        limit: clamp_limit(query.limit),
        total: listagem.total,
        has_more: listagem.has_more,
        catalogo,
    }))
}

/// POST /api/catalogo/sync - mirror the full upstream catalog (privileged)
///
/// Runs inline in this request and returns the number of variant-level
/// records seen.
pub async fn sync(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<SyncOutcome>>> {
    let gateway = state.gateway()?;
    tracing::info!(user = %user.audit_name(), "Catalog sync triggered");

    let job = CatalogSync::new(gateway, CatalogRepository::new(state.db.pool.clone()));
    let total = job.run().await?;

    Ok(ok(SyncOutcome { total }))
}
