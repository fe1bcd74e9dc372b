//! Catalog mirror repository

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepoResult;
use crate::db::models::CatalogEntry;

/// Filter options for the mirror listing
///
/// `busca` matches sku or name (case-insensitive substring); `fornecedor`
/// matches an associated supplier name or the external supplier code.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    pub busca: Option<String>,
    pub fornecedor: Option<String>,
    /// 1-based page, already clamped by the caller
    pub page: u32,
    pub limit: u32,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            busca: None,
            fornecedor: None,
            page: 1,
            limit: 100,
        }
    }
}

#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Bulk idempotent upsert keyed by sku, full-row overwrite
    ///
    /// Runs in one transaction; rows with an empty SKU are skipped. Returns
    /// the number of rows written.
    pub async fn upsert_all(&self, rows: &[CatalogEntry]) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0u64;

        for row in rows {
            if row.sku.is_empty() {
                continue;
            }
            sqlx::query(
                "INSERT INTO catalogo \
                   (sku, nome_derivacao, codigo_pai, id_derivacao, url_imagem, ativo, preco) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
                 ON CONFLICT(sku) DO UPDATE SET \
                   nome_derivacao = excluded.nome_derivacao, \
                   codigo_pai = excluded.codigo_pai, \
                   id_derivacao = excluded.id_derivacao, \
                   url_imagem = excluded.url_imagem, \
                   ativo = excluded.ativo, \
                   preco = excluded.preco",
            )
            .bind(&row.sku)
            .bind(&row.nome_derivacao)
            .bind(&row.codigo_pai)
            .bind(row.id_derivacao)
            .bind(&row.url_imagem)
            .bind(row.ativo)
            .bind(row.preco)
            .execute(&mut *tx)
            .await?;
            written += 1;
        }

        tx.commit().await?;
        Ok(written)
    }

    /// Filtered, paged, name-ordered read of the mirror plus the total count
    /// for the same filter
    pub async fn search(&self, filter: &CatalogFilter) -> RepoResult<(Vec<CatalogEntry>, u64)> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM catalogo WHERE 1=1");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::new(
            "SELECT sku, nome_derivacao, codigo_pai, id_derivacao, url_imagem, ativo, preco \
             FROM catalogo WHERE 1=1",
        );
        push_filters(&mut query, filter);

        let limit = filter.limit.max(1) as i64;
        let page = filter.page.max(1) as i64;
        query.push(" ORDER BY nome_derivacao COLLATE NOCASE, sku");
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind((page - 1) * limit);

        let rows = query
            .build_query_as::<CatalogEntry>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total as u64))
    }

    /// Single mirror row, if present
    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<CatalogEntry>> {
        let row = sqlx::query_as::<_, CatalogEntry>(
            "SELECT sku, nome_derivacao, codigo_pai, id_derivacao, url_imagem, ativo, preco \
             FROM catalogo WHERE sku = ?1",
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &CatalogFilter) {
    if let Some(busca) = filter.busca.as_deref().map(str::trim)
        && !busca.is_empty()
    {
        let pattern = format!("%{busca}%");
        query.push(" AND (sku LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR nome_derivacao LIKE ");
        query.push_bind(pattern);
        query.push(")");
    }

    if let Some(fornecedor) = filter.fornecedor.as_deref().map(str::trim)
        && !fornecedor.is_empty()
    {
        let pattern = format!("%{fornecedor}%");
        query.push(
            " AND sku IN ( \
               SELECT pf.sku FROM produto_fornecedor pf \
               JOIN fornecedor f ON f.id = pf.fornecedor_id \
               WHERE f.nome LIKE ",
        );
        query.push_bind(pattern.clone());
        query.push(
            " UNION \
               SELECT pe.sku FROM produto_extra pe WHERE pe.cod_fornecedor LIKE ",
        );
        query.push_bind(pattern);
        query.push(")");
    }
}
