//! End-to-end catalog synchronization against a stubbed ERP

use std::str::FromStr;
use std::sync::Arc;

use serde_json::json;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use magazord_client::{MagazordClient, MagazordConfig};
use painel_server::db::repository::{CatalogFilter, CatalogRepository};
use painel_server::sync::CatalogSync;
use painel_server::utils::AppError;

async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

fn gateway(base_url: &str) -> Arc<MagazordClient> {
    Arc::new(
        MagazordClient::new(MagazordConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: "tok".to_string(),
            secret: "sec".to_string(),
            loja_id: 1,
            cdn_base_url: "http://cdn".to_string(),
            deposito_id: None,
            tabela_preco_id: None,
        })
        .unwrap(),
    )
}

fn page_body(items: serde_json::Value, total: u64, has_more: bool) -> serde_json::Value {
    json!({"data": {"items": items, "total": total, "has_more": has_more}})
}

#[tokio::test]
async fn single_page_walk_mirrors_the_derivations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/site/frontend/produto/1"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            json!([
                {"tipo_registro": 1, "codigo": "PAI", "nome": "Camisa"},
                {"tipo_registro": 2, "codigo": "A1", "nome": "Camisa", "derivacao_nome": "M"},
                {"tipo_registro": 2, "codigo": "A2", "nome": "Camisa", "derivacao_nome": "P"}
            ]),
            3,
            false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let pool = test_pool().await;
    let repo = CatalogRepository::new(pool.clone());
    let job = CatalogSync::new(gateway(&server.uri()), repo.clone());

    let total = job.run().await.unwrap();
    assert_eq!(total, 2);

    let (rows, stored) = repo.search(&CatalogFilter::default()).await.unwrap();
    assert_eq!(stored, 2);
    let skus: Vec<&str> = rows.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(skus, vec!["A1", "A2"]);
    assert_eq!(rows[0].nome_derivacao, "Camisa - M");
}

#[tokio::test]
async fn walk_follows_has_more_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/site/frontend/produto/1"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            json!([{"tipo_registro": 2, "codigo": "A1", "nome": "Camisa"}]),
            2,
            true,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/site/frontend/produto/1"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            json!([{"tipo_registro": 2, "codigo": "B1", "nome": "Bermuda"}]),
            2,
            false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let pool = test_pool().await;
    let repo = CatalogRepository::new(pool);
    let total = CatalogSync::new(gateway(&server.uri()), repo.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(total, 2);
    let (_, stored) = repo.search(&CatalogFilter::default()).await.unwrap();
    assert_eq!(stored, 2);
}

#[tokio::test]
async fn empty_skus_count_toward_the_total_but_are_not_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            json!([
                {"tipo_registro": 2, "codigo": "", "nome": "Sem codigo"},
                {"tipo_registro": 2, "codigo": "A1", "nome": "Camisa"}
            ]),
            2,
            false,
        )))
        .mount(&server)
        .await;

    let pool = test_pool().await;
    let repo = CatalogRepository::new(pool);
    let total = CatalogSync::new(gateway(&server.uri()), repo.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(total, 2);
    let (_, stored) = repo.search(&CatalogFilter::default()).await.unwrap();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn a_failed_walk_aborts_before_anything_is_written() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            json!([{"tipo_registro": 2, "codigo": "A1", "nome": "Camisa"}]),
            2,
            true,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let pool = test_pool().await;
    let repo = CatalogRepository::new(pool);
    let err = CatalogSync::new(gateway(&server.uri()), repo.clone())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Upstream { status: 500, .. }));
    let (_, stored) = repo.search(&CatalogFilter::default()).await.unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn repeated_runs_converge_to_the_same_mirror() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            json!([
                {"tipo_registro": 2, "codigo": "A1", "nome": "Camisa",
                 "derivacao_nome": "P", "valor": 49.9, "codigo_pai": "CAM"}
            ]),
            1,
            false,
        )))
        .mount(&server)
        .await;

    let pool = test_pool().await;
    let repo = CatalogRepository::new(pool);
    let job = CatalogSync::new(gateway(&server.uri()), repo.clone());

    job.run().await.unwrap();
    let (first, _) = repo.search(&CatalogFilter::default()).await.unwrap();
    job.run().await.unwrap();
    let (second, _) = repo.search(&CatalogFilter::default()).await.unwrap();

    assert_eq!(first, second);
}
