//! Persisted entities and edit payloads

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use magazord_client::CatalogoRow;

/// Mirrored copy of the ERP-visible attributes for one SKU
///
/// Rows are created and overwritten only by the synchronization job; stale
/// SKUs persist until a future cleanup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub sku: String,
    pub nome_derivacao: String,
    pub codigo_pai: String,
    pub id_derivacao: Option<i64>,
    pub url_imagem: String,
    pub ativo: bool,
    pub preco: Option<f64>,
}

impl From<CatalogoRow> for CatalogEntry {
    fn from(row: CatalogoRow) -> Self {
        Self {
            sku: row.sku,
            nome_derivacao: row.nome_derivacao,
            codigo_pai: row.codigo_pai,
            id_derivacao: row.id_derivacao,
            url_imagem: row.url_imagem,
            ativo: row.ativo,
            preco: row.preco,
        }
    }
}

/// Locally-owned metadata keyed by SKU, lifecycle independent of the mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SupplierExtra {
    pub sku: String,
    pub cod_fornecedor: String,
    pub fora_de_linha: bool,
    pub observacoes: String,
}

/// Supplier extras plus the associated supplier names, as served to the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierExtraFull {
    pub sku: String,
    pub cod_fornecedor: String,
    pub fora_de_linha: bool,
    pub observacoes: String,
    pub fornecedores: Vec<String>,
}

/// Edit payload for supplier extras; the association set is replaced whole
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierExtraUpdate {
    #[serde(default)]
    pub cod_fornecedor: String,
    #[serde(default)]
    pub fora_de_linha: bool,
    #[serde(default)]
    pub observacoes: String,
    /// Supplier ids to associate; zero ids are discarded
    #[serde(default)]
    pub fornecedores: Vec<i64>,
}

/// Supplier entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub nome: String,
    pub ativo: bool,
    pub created_at: NaiveDateTime,
}

/// Partial supplier update; at least one field must be present
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierUpdate {
    pub nome: Option<String>,
    pub ativo: Option<bool>,
}
