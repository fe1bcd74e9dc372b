//! Supplier repository

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{Supplier, SupplierUpdate};

const SUPPLIER_COLUMNS: &str = "id, nome, ativo, created_at";

#[derive(Clone)]
pub struct FornecedorRepository {
    pool: SqlitePool,
}

impl FornecedorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All suppliers ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM fornecedor ORDER BY nome COLLATE NOCASE"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, nome: &str) -> RepoResult<Supplier> {
        let row = sqlx::query_as::<_, Supplier>(&format!(
            "INSERT INTO fornecedor (nome) VALUES (?1) RETURNING {SUPPLIER_COLUMNS}"
        ))
        .bind(nome)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Partial update; untouched fields keep their value
    pub async fn update(&self, id: i64, update: &SupplierUpdate) -> RepoResult<Supplier> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE fornecedor SET ");
        let mut separated = query.separated(", ");
        if let Some(nome) = &update.nome {
            separated.push("nome = ");
            separated.push_bind_unseparated(nome.trim().to_string());
        }
        if let Some(ativo) = update.ativo {
            separated.push("ativo = ");
            separated.push_bind_unseparated(ativo);
        }
        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(&format!(" RETURNING {SUPPLIER_COLUMNS}"));

        query
            .build_query_as::<Supplier>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Fornecedor {id}")))
    }

    /// Delete one supplier; association rows cascade with it
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM fornecedor WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
