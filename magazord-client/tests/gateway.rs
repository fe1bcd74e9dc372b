//! Gateway behavior against a stubbed upstream

use magazord_client::{GatewayError, MagazordClient, MagazordConfig, Movimento};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> MagazordConfig {
    MagazordConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        token: "tok".to_string(),
        secret: "sec".to_string(),
        loja_id: 1,
        cdn_base_url: "http://cdn".to_string(),
        deposito_id: Some("3".to_string()),
        tabela_preco_id: Some("7".to_string()),
    }
}

#[tokio::test]
async fn catalog_listing_sends_basic_auth_and_clamped_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/site/frontend/produto/1"))
        .and(query_param("limit", "100"))
        .and(query_param("page", "1"))
        .and(header("Authorization", "Basic dG9rOnNlYw=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [
                    {"tipo_registro": 1, "codigo": "PAI", "nome": "Pai"},
                    {"tipo_registro": 2, "codigo": "A1", "nome": "Pai",
                     "derivacao_nome": "Azul", "valor": 19.9}
                ],
                "total": 2,
                "has_more": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MagazordClient::new(test_config(&server.uri())).unwrap();
    // limit above the cap, page below the floor
    let page = client.list_catalog_page(0, 1000).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 2);
    assert!(!page.has_more);

    let rows = client.map_derivacoes(&page.items);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].sku, "A1");
    assert_eq!(rows[0].nome_derivacao, "Pai - Azul");
    assert_eq!(rows[0].preco, Some(19.9));
}

#[tokio::test]
async fn upstream_failure_carries_status_and_truncated_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("b".repeat(2000)))
        .mount(&server)
        .await;

    let client = MagazordClient::new(test_config(&server.uri())).unwrap();
    let err = client.list_catalog_page(1, 100).await.unwrap_err();
    match err {
        GatewayError::Upstream { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body.len(), 500);
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limited_response_is_detectable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("throttled"))
        .mount(&server)
        .await;

    let client = MagazordClient::new(test_config(&server.uri())).unwrap();
    let err = client.fetch_inventory("A1", 100).await.unwrap_err();
    assert!(err.is_rate_limit());
}

#[tokio::test]
async fn inventory_empty_result_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/listEstoque"))
        .and(query_param("produto", "A1"))
        .and(query_param("deposito", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = MagazordClient::new(test_config(&server.uri())).unwrap();
    let rows = client.fetch_inventory("A1", 100).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn price_read_returns_first_row_or_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/listPreco"))
        .and(query_param("tabelaPreco", "7"))
        .and(query_param("produto", "A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"precoVenda": 49.9}, {"precoVenda": 1.0}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/listPreco"))
        .and(query_param("produto", "B2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = MagazordClient::new(test_config(&server.uri())).unwrap();
    assert_eq!(client.fetch_price("A1").await.unwrap(), Some(49.9));
    assert_eq!(client.fetch_price("B2").await.unwrap(), None);
}

#[tokio::test]
async fn missing_price_list_fails_before_any_request() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri());
    config.tabela_preco_id = None;

    let client = MagazordClient::new(config).unwrap();
    let err = client.fetch_price("A1").await.unwrap_err();
    assert!(matches!(err, GatewayError::Config(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn movement_submission_posts_expected_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/movimentoEstoque"))
        .and(body_json(json!({
            "produto": "A1",
            "deposito": "3",
            "quantidade": 5.0,
            "tipo": "E",
            "tipoOperacao": 1,
            "origemMovimento": 2,
            "observacao": "[painel] +5 recontagem (op@loja.com)",
            "valorMovimento": 50.02
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 99}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = MagazordClient::new(test_config(&server.uri())).unwrap();
    let resposta = client
        .post_inventory_movement(&Movimento {
            sku: "A1".to_string(),
            quantidade: 5.0,
            custo_base: Some(10.004),
            motivo: "recontagem".to_string(),
            usuario: "op@loja.com".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(resposta["data"]["id"], 99);
}

#[tokio::test]
async fn price_submission_sends_single_item_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/updatePreco"))
        .and(body_json(json!([{
            "produto": "A1",
            "tabelaPreco": "7",
            "precoVenda": 29.9
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = MagazordClient::new(test_config(&server.uri())).unwrap();
    client.post_price("A1", 29.9).await.unwrap();
}
