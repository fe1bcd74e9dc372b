//! Supplier API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::api::{AppResponse, AppResult, ok};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Supplier, SupplierUpdate};
use crate::db::repository::FornecedorRepository;
use crate::utils::AppError;

#[derive(Debug, Serialize)]
pub struct FornecedoresOut {
    pub fornecedores: Vec<Supplier>,
}

#[derive(Debug, Serialize)]
pub struct FornecedorOut {
    pub fornecedor: Supplier,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub nome: String,
}

/// GET /api/fornecedores - all suppliers ordered by name (privileged)
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<AppResponse<FornecedoresOut>>> {
    let repo = FornecedorRepository::new(state.db.pool.clone());
    let fornecedores = repo.find_all().await?;
    Ok(ok(FornecedoresOut { fornecedores }))
}

/// POST /api/fornecedores - create a supplier (privileged)
pub async fn create(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(request): Json<CreateRequest>,
) -> AppResult<Json<AppResponse<FornecedorOut>>> {
    let nome = request.nome.trim().to_string();
    if nome.is_empty() {
        return Err(AppError::validation("nome required"));
    }

    let repo = FornecedorRepository::new(state.db.pool.clone());
    let fornecedor = repo.create(&nome).await?;
    Ok(ok(FornecedorOut { fornecedor }))
}

/// PATCH /api/fornecedores/{id} - rename or toggle a supplier (privileged)
pub async fn update(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<SupplierUpdate>,
) -> AppResult<Json<AppResponse<FornecedorOut>>> {
    if id <= 0 {
        return Err(AppError::validation("invalid id"));
    }
    if request.nome.is_none() && request.ativo.is_none() {
        return Err(AppError::validation("no fields"));
    }
    if let Some(nome) = &request.nome
        && nome.trim().is_empty()
    {
        return Err(AppError::validation("nome required"));
    }

    let repo = FornecedorRepository::new(state.db.pool.clone());
    let fornecedor = repo.update(id, &request).await?;
    Ok(ok(FornecedorOut { fornecedor }))
}

/// DELETE /api/fornecedores/{id} - remove a supplier and its associations
/// (privileged)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    if id <= 0 {
        return Err(AppError::validation("invalid id"));
    }

    let repo = FornecedorRepository::new(state.db.pool.clone());
    let removed = repo.delete(id).await?;
    if !removed {
        return Err(AppError::not_found(format!("Fornecedor {id}")));
    }
    tracing::info!(user = %user.audit_name(), id, "Supplier deleted");
    Ok(ok(()))
}
