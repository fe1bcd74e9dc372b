//! Wire types for the Magazord API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of the upstream product-derivation listing
///
/// `items` are the raw upstream records; callers normalize them with
/// [`crate::catalog::map_derivacao`]. `total` and `has_more` come from the
/// upstream envelope.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub items: Vec<Value>,
    pub total: u64,
    pub has_more: bool,
}

/// Normalized variant-level catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogoRow {
    /// Upstream "codigo", the SKU
    pub sku: String,
    /// "<parent name> - <variant name>" when both are present
    pub nome_derivacao: String,
    pub codigo_pai: String,
    pub id_derivacao: Option<i64>,
    /// Derived display URL; empty when the source media lacks a usable path
    pub url_imagem: String,
    /// False only when the upstream marks the record explicitly inactive
    pub ativo: bool,
    pub preco: Option<f64>,
}

/// Live per-SKU stock figures from the inventory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstoqueRow {
    pub sku: String,
    pub estoque_atual: f64,
    pub estoque_reservado: f64,
    pub custo_medio: f64,
}

/// One inventory movement to submit against the ERP
///
/// `quantidade` is signed: negative reduces stock. `usuario` is the acting
/// identity embedded in the audit observation.
#[derive(Debug, Clone)]
pub struct Movimento {
    pub sku: String,
    pub quantidade: f64,
    /// Unit cost for cost-bearing entries
    pub custo_base: Option<f64>,
    /// Free-text reason recorded in the audit observation
    pub motivo: String,
    /// Acting user identity
    pub usuario: String,
}
