//! Catalog normalization
//!
//! The product-derivation listing mixes parent/group records with
//! variant-level records and has carried several key names for the same
//! logical field across API revisions. Each field reads from an explicit
//! ordered candidate list, first non-absent wins.

use serde_json::Value;

use crate::types::{CatalogoRow, EstoqueRow};

/// Upstream record-type marker for variant-level (derivation) products
pub const TIPO_REGISTRO_DERIVACAO: i64 = 2;

// Candidate key chains, oldest upstream spelling last
const ID_DERIVACAO_KEYS: &[&str] = &["derivacao_id", "id_derivacao", "id"];
const CODIGO_PAI_KEYS: &[&str] = &["codigo_pai", "codigoPai", "produto_codigo_pai"];
const PRECO_KEYS: &[&str] = &["valor"];
const ESTOQUE_SKU_KEYS: &[&str] = &["produto", "codigo", "sku"];
const PRECO_VENDA_KEYS: &[&str] = &["precoVenda", "preco_venda"];

/// First non-absent, non-null value among the candidate keys
fn first_of<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        let value = item.get(*key)?;
        if value.is_null() { None } else { Some(value) }
    })
}

/// Numeric coercion: accepts JSON numbers and numeric strings
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn str_field<'a>(item: &'a Value, keys: &[&str]) -> &'a str {
    first_of(item, keys).and_then(Value::as_str).unwrap_or("")
}

fn num_field(item: &Value, keys: &[&str]) -> Option<f64> {
    first_of(item, keys).and_then(as_number)
}

/// Whether a raw listing record is a variant-level product
pub fn is_derivacao(item: &Value) -> bool {
    item.get("tipo_registro").and_then(Value::as_i64) == Some(TIPO_REGISTRO_DERIVACAO)
}

/// Compose the display name: "<parent> - <variant>" when both are non-empty,
/// else the parent name
fn compose_nome(item: &Value) -> String {
    let nome = item.get("nome").and_then(Value::as_str).unwrap_or("");
    let derivacao = item
        .get("derivacao_nome")
        .and_then(Value::as_str)
        .unwrap_or("");
    if !nome.is_empty() && !derivacao.is_empty() {
        format!("{nome} - {derivacao}")
    } else {
        nome.to_string()
    }
}

/// Derive the public image URL for a media entry
///
/// Pure function, used identically during sync and direct reads. Returns ""
/// when the path or file name is missing, or when a relative path has no CDN
/// base to resolve against.
pub fn build_image_url(cdn_base: &str, path: &str, arquivo: &str) -> String {
    let cdn_base = cdn_base.trim().trim_end_matches('/');
    let path = path.trim();
    let arquivo = arquivo.trim();
    if path.is_empty() || arquivo.is_empty() {
        return String::new();
    }
    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return format!("{}/{}", path.trim_end_matches('/'), arquivo);
    }
    if cdn_base.is_empty() {
        return String::new();
    }
    format!(
        "{}/{}/{}",
        cdn_base,
        path.trim_start_matches('/').trim_end_matches('/'),
        arquivo
    )
}

/// Normalize one variant-level record into a catalog row
///
/// Returns `None` for parent/group records. The SKU may still be empty;
/// callers that persist rows skip those.
pub fn map_derivacao(item: &Value, cdn_base: &str) -> Option<CatalogoRow> {
    if !is_derivacao(item) {
        return None;
    }

    let url_imagem = item
        .get("midias")
        .and_then(|m| m.get(0))
        .map(|midia| {
            build_image_url(
                cdn_base,
                midia.get("path").and_then(Value::as_str).unwrap_or(""),
                midia
                    .get("arquivo_nome")
                    .and_then(Value::as_str)
                    .unwrap_or(""),
            )
        })
        .unwrap_or_default();

    Some(CatalogoRow {
        sku: str_field(item, &["codigo"]).trim().to_string(),
        nome_derivacao: compose_nome(item),
        codigo_pai: str_field(item, CODIGO_PAI_KEYS).to_string(),
        id_derivacao: first_of(item, ID_DERIVACAO_KEYS).and_then(Value::as_i64),
        url_imagem,
        // Active unless the upstream says otherwise explicitly
        ativo: item.get("ativo").and_then(Value::as_bool) != Some(false),
        preco: num_field(item, PRECO_KEYS),
    })
}

/// Normalize one inventory listing row
pub fn map_estoque(item: &Value) -> EstoqueRow {
    EstoqueRow {
        sku: str_field(item, ESTOQUE_SKU_KEYS).to_string(),
        estoque_atual: num_field(item, &["quantidadeDisponivelVenda"]).unwrap_or(0.0),
        estoque_reservado: num_field(item, &["quantidadeReservadoSaida"]).unwrap_or(0.0),
        custo_medio: num_field(item, &["custoMedio"]).unwrap_or(0.0),
    }
}

/// Extract the sell price from the first row of a price listing
pub fn map_preco(row: &Value) -> Option<f64> {
    num_field(row, PRECO_VENDA_KEYS)
}
