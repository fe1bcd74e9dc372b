//! HTTP client for the Magazord API

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde_json::{Value, json};

use crate::catalog;
use crate::config::MagazordConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::types::{CatalogPage, CatalogoRow, EstoqueRow, Movimento};

/// Hard cap the upstream accepts per listing page
pub const LIMIT_MAX: u32 = 100;

/// Request timeout for all upstream calls
const REQUEST_TIMEOUT_SECS: u64 = 30;

// Movement direction codes
const TIPO_ENTRADA: &str = "E";
const TIPO_SAIDA: &str = "S";
// Balance-adjustment operation code
const TIPO_OPERACAO_AJUSTE: u8 = 1;
// Movement-origin codes: plain manual entry vs. cost-bearing entry
const ORIGEM_MANUAL: u8 = 1;
const ORIGEM_COM_CUSTO: u8 = 2;

/// Clamp a requested page size into the accepted `[1, 100]` range
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, LIMIT_MAX)
}

/// Clamp a requested page number to `>= 1`
pub fn clamp_page(page: u32) -> u32 {
    page.max(1)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Authenticated client for the Magazord catalog/inventory/pricing API
///
/// Holds one connection pool and the precomputed Basic credential. All
/// operations surface non-success statuses as [`GatewayError::Upstream`]
/// with the truncated response body; nothing is retried here.
pub struct MagazordClient {
    http: Client,
    config: MagazordConfig,
    auth_header: String,
}

impl MagazordClient {
    /// Build a client, failing fast when the base URL or credentials are
    /// missing
    pub fn new(config: MagazordConfig) -> GatewayResult<Self> {
        if config.base_url.is_empty() || config.token.is_empty() || config.secret.is_empty() {
            return Err(GatewayError::Config(
                "MAGAZORD_BASE_URL, MAGAZORD_TOKEN and MAGAZORD_SECRET must be set".into(),
            ));
        }

        let auth_header = format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", config.token, config.secret))
        );

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            config,
            auth_header,
        })
    }

    pub fn config(&self) -> &MagazordConfig {
        &self.config
    }

    /// One page of the product-derivation listing
    ///
    /// Returns the raw upstream items plus `total` and `has_more` from the
    /// envelope; normalization is a separate step so callers can count raw
    /// records.
    pub async fn list_catalog_page(&self, page: u32, limit: u32) -> GatewayResult<CatalogPage> {
        let path = format!("/api/v2/site/frontend/produto/{}", self.config.loja_id);
        let query = [
            ("limit", clamp_limit(limit).to_string()),
            ("page", clamp_page(page).to_string()),
        ];
        let body = self.get_json(&path, &query).await?;

        let data = body.get("data").cloned().unwrap_or(Value::Null);
        let items = match data.get("items") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        let total = data
            .get("total")
            .and_then(Value::as_u64)
            .unwrap_or(items.len() as u64);
        let has_more = data
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(CatalogPage {
            items,
            total,
            has_more,
        })
    }

    /// Filter a raw listing page down to variant-level records and normalize
    /// them
    pub fn map_derivacoes(&self, items: &[Value]) -> Vec<CatalogoRow> {
        items
            .iter()
            .filter_map(|item| catalog::map_derivacao(item, &self.config.cdn_base_url))
            .collect()
    }

    /// Live stock figures for one SKU
    ///
    /// An empty result set is a valid "no data" outcome, not an error.
    pub async fn fetch_inventory(&self, sku: &str, limit: u32) -> GatewayResult<Vec<EstoqueRow>> {
        let sku = required_sku(sku)?;

        let mut query = vec![
            ("limit", clamp_limit(limit).to_string()),
            ("offset", "0".to_string()),
            ("produto", sku.to_string()),
        ];
        if let Some(deposito) = &self.config.deposito_id {
            query.push(("deposito", deposito.clone()));
        }

        let body = self.get_json("/api/v1/listEstoque", &query).await?;
        let rows = match body.get("data") {
            Some(Value::Array(rows)) => rows.iter().map(catalog::map_estoque).collect(),
            _ => Vec::new(),
        };
        Ok(rows)
    }

    /// Current sell price for one SKU on the configured price list, or None
    /// when the list has no row for it
    pub async fn fetch_price(&self, sku: &str) -> GatewayResult<Option<f64>> {
        let sku = required_sku(sku)?;
        let tabela = self.tabela_preco()?;

        let query = [
            ("tabelaPreco", tabela.to_string()),
            ("produto", sku.to_string()),
            ("limit", "1".to_string()),
            ("offset", "0".to_string()),
        ];
        let body = self.get_json("/api/v1/listPreco", &query).await?;

        let preco = body
            .get("data")
            .and_then(Value::as_array)
            .and_then(|rows| rows.first())
            .and_then(catalog::map_preco);
        Ok(preco)
    }

    /// Submit one inventory movement against the configured warehouse
    ///
    /// Returns the upstream response payload verbatim.
    pub async fn post_inventory_movement(&self, movimento: &Movimento) -> GatewayResult<Value> {
        let deposito = self
            .config
            .deposito_id
            .as_deref()
            .ok_or_else(|| GatewayError::Config("MAGAZORD_DEPOSITO_ID must be set".into()))?
            .to_string();

        let body = movimento_body(&deposito, movimento)?;
        self.post_json("/api/v1/movimentoEstoque", &body).await
    }

    /// Replace the sell price for one SKU on the configured price list
    pub async fn post_price(&self, sku: &str, preco: f64) -> GatewayResult<()> {
        let sku = required_sku(sku)?;
        let tabela = self.tabela_preco()?.to_string();

        let body = json!([{
            "produto": sku,
            "tabelaPreco": tabela,
            "precoVenda": preco,
        }]);
        self.post_json("/api/v1/updatePreco", &body).await?;
        Ok(())
    }

    fn tabela_preco(&self) -> GatewayResult<&str> {
        self.config
            .tabela_preco_id
            .as_deref()
            .ok_or_else(|| GatewayError::Config("MAGAZORD_TABELA_PRECO_ID must be set".into()))
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<Value> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> GatewayResult<Value> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> GatewayResult<Value> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Magazord returned non-success");
            return Err(GatewayError::upstream(status.as_u16(), &text));
        }
        serde_json::from_str(&text).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

fn required_sku(sku: &str) -> GatewayResult<&str> {
    let sku = sku.trim();
    if sku.is_empty() {
        return Err(GatewayError::Validation("sku required".into()));
    }
    Ok(sku)
}

/// Build the movement submission payload
///
/// Direction comes from the sign of the quantity; the quantity itself is sent
/// absolute. `valorMovimento` is present only for positive movements with a
/// positive base cost. The observation embeds sign, quantity, reason and the
/// acting user.
fn movimento_body(deposito: &str, movimento: &Movimento) -> GatewayResult<Value> {
    let sku = required_sku(&movimento.sku)?;
    if movimento.quantidade == 0.0 {
        return Err(GatewayError::Validation(
            "quantidade must be non-zero".into(),
        ));
    }

    let reduzir = movimento.quantidade < 0.0;
    let quantidade = movimento.quantidade.abs();

    let valor_movimento = if reduzir {
        None
    } else {
        movimento
            .custo_base
            .filter(|custo| *custo > 0.0)
            .map(|custo| round2(quantidade * custo))
    };

    let sinal = if reduzir { "-" } else { "+" };
    let observacao = format!(
        "[painel] {sinal}{quantidade} {motivo} ({usuario})",
        motivo = movimento.motivo,
        usuario = movimento.usuario,
    );

    let mut body = json!({
        "produto": sku,
        "deposito": deposito,
        "quantidade": quantidade,
        "tipo": if reduzir { TIPO_SAIDA } else { TIPO_ENTRADA },
        "tipoOperacao": TIPO_OPERACAO_AJUSTE,
        "origemMovimento": if valor_movimento.is_some() { ORIGEM_COM_CUSTO } else { ORIGEM_MANUAL },
        "observacao": observacao,
    });
    if let Some(valor) = valor_movimento {
        body["valorMovimento"] = json!(valor);
    }
    Ok(body)
}
