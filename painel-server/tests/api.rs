//! HTTP surface tests over the assembled router
//!
//! The Magazord gateway is deliberately left unconfigured here: ERP-backed
//! routes must fail with a configuration error, everything store-backed must
//! work normally.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use magazord_client::MagazordConfig;
use painel_server::auth::{Claims, JwtConfig};
use painel_server::{Config, ServerState, api};

const JWT_SECRET: &str = "painel-test-secret";

async fn test_state(dir: &tempfile::TempDir) -> ServerState {
    let db_path = dir.path().join("painel-test.db");
    let config = Config {
        http_port: 0,
        db_path: db_path.to_str().unwrap().to_string(),
        environment: "development".to_string(),
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            audience: Some("authenticated".to_string()),
        },
        magazord: MagazordConfig::default(),
    };
    ServerState::initialize(&config).await.unwrap()
}

fn bearer_token() -> String {
    let claims = Claims {
        sub: "user-1".to_string(),
        email: "op@loja.com".to_string(),
        aud: "authenticated".to_string(),
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer_token()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_answers_without_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let app = api::router(test_state(&dir).await);

    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn privileged_routes_reject_missing_and_bad_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let app = api::router(test_state(&dir).await);

    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/catalogo/sync")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/api/fornecedores")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn supplier_lifecycle_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let app = api::router(test_state(&dir).await);

    // Create
    let (status, body) = send(
        &app,
        authed("POST", "/api/fornecedores", json!({"nome": "  Acme  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fornecedor"]["nome"], "Acme");
    let id = body["data"]["fornecedor"]["id"].as_i64().unwrap();

    // Empty name is rejected before touching the store
    let (status, _) = send(&app, authed("POST", "/api/fornecedores", json!({"nome": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // List
    let (status, body) = send(&app, authed("GET", "/api/fornecedores", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fornecedores"].as_array().unwrap().len(), 1);

    // Patch with no recognized field
    let (status, _) = send(
        &app,
        authed("PATCH", &format!("/api/fornecedores/{id}"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Rename + deactivate
    let (status, body) = send(
        &app,
        authed(
            "PATCH",
            &format!("/api/fornecedores/{id}"),
            json!({"nome": "Acme Ltda", "ativo": false}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fornecedor"]["nome"], "Acme Ltda");
    assert_eq!(body["data"]["fornecedor"]["ativo"], false);

    // Delete, then the id is gone
    let (status, _) = send(
        &app,
        authed("DELETE", &format!("/api/fornecedores/{id}"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        authed("DELETE", &format!("/api/fornecedores/{id}"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn extras_roundtrip_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let app = api::router(test_state(&dir).await);

    let (_, body) = send(
        &app,
        authed("POST", "/api/fornecedores", json!({"nome": "Bravo"})),
    )
    .await;
    let id = body["data"]["fornecedor"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        authed(
            "PUT",
            "/api/extras/CAM-P",
            json!({
                "codFornecedor": "BRV-1",
                "foraDeLinha": true,
                "observacoes": "reposicao lenta",
                "fornecedores": [id]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Public read
    let (status, body) = send(&app, get("/api/extras?skus=CAM-P,OUTRO")).await;
    assert_eq!(status, StatusCode::OK);
    let extras = body["data"]["extras"].as_array().unwrap();
    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0]["sku"], "CAM-P");
    assert_eq!(extras[0]["codFornecedor"], "BRV-1");
    assert_eq!(extras[0]["foraDeLinha"], true);
    assert_eq!(extras[0]["fornecedores"], json!(["Bravo"]));

    // Writes require identity
    let (status, _) = send(
        &app,
        Request::builder()
            .method("PUT")
            .uri("/api/extras/CAM-P")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Missing skus parameter
    let (status, _) = send(&app, get("/api/extras?skus=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn catalog_read_works_on_an_empty_mirror() {
    let dir = tempfile::tempdir().unwrap();
    let app = api::router(test_state(&dir).await);

    let (status, body) = send(&app, get("/api/catalogo?busca=camisa&page=0&limit=1000")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
    // Requested paging is clamped into the accepted range
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["limit"], 100);
}

#[tokio::test]
async fn erp_backed_routes_fail_fast_without_gateway_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let app = api::router(test_state(&dir).await);

    // Validation still comes first
    let (status, _) = send(&app, get("/api/estoque?sku=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/api/estoque?sku=A1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("MAGAZORD_BASE_URL")
    );

    let (status, _) = send(
        &app,
        authed(
            "POST",
            "/api/estoque",
            json!({"sku": "A1", "quantidade": -5}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // Zero quantity is rejected before the gateway is even consulted
    let (status, _) = send(
        &app,
        authed("POST", "/api/estoque", json!({"sku": "A1", "quantidade": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
