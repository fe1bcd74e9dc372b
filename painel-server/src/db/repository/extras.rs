//! Supplier extras repository

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepoResult;
use crate::db::models::{SupplierExtra, SupplierExtraFull, SupplierExtraUpdate};

#[derive(Clone)]
pub struct ExtrasRepository {
    pool: SqlitePool,
}

impl ExtrasRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Extras rows plus their associated supplier names for a set of SKUs
    ///
    /// Only SKUs that actually have an extras row come back.
    pub async fn find_for_skus(&self, skus: &[String]) -> RepoResult<Vec<SupplierExtraFull>> {
        if skus.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT sku, cod_fornecedor, fora_de_linha, observacoes \
             FROM produto_extra WHERE sku IN (",
        );
        push_sku_list(&mut query, skus);
        query.push(") ORDER BY sku");
        let extras = query
            .build_query_as::<SupplierExtra>()
            .fetch_all(&self.pool)
            .await?;

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT pf.sku, f.nome FROM produto_fornecedor pf \
             JOIN fornecedor f ON f.id = pf.fornecedor_id \
             WHERE pf.sku IN (",
        );
        push_sku_list(&mut query, skus);
        query.push(") ORDER BY f.nome COLLATE NOCASE");
        let relations = query
            .build_query_as::<(String, String)>()
            .fetch_all(&self.pool)
            .await?;

        let mut nomes_by_sku: HashMap<String, Vec<String>> = HashMap::new();
        for (sku, nome) in relations {
            nomes_by_sku.entry(sku).or_default().push(nome);
        }

        Ok(extras
            .into_iter()
            .map(|extra| {
                let fornecedores = nomes_by_sku.remove(&extra.sku).unwrap_or_default();
                SupplierExtraFull {
                    sku: extra.sku,
                    cod_fornecedor: extra.cod_fornecedor,
                    fora_de_linha: extra.fora_de_linha,
                    observacoes: extra.observacoes,
                    fornecedores,
                }
            })
            .collect())
    }

    /// Upsert the extras row and replace the whole supplier association set
    /// (delete-then-insert) in one transaction
    pub async fn upsert(&self, sku: &str, update: &SupplierExtraUpdate) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO produto_extra (sku, cod_fornecedor, fora_de_linha, observacoes) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(sku) DO UPDATE SET \
               cod_fornecedor = excluded.cod_fornecedor, \
               fora_de_linha = excluded.fora_de_linha, \
               observacoes = excluded.observacoes",
        )
        .bind(sku)
        .bind(update.cod_fornecedor.trim())
        .bind(update.fora_de_linha)
        .bind(update.observacoes.trim())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM produto_fornecedor WHERE sku = ?1")
            .bind(sku)
            .execute(&mut *tx)
            .await?;

        for fornecedor_id in update.fornecedores.iter().filter(|id| **id != 0) {
            sqlx::query("INSERT INTO produto_fornecedor (sku, fornecedor_id) VALUES (?1, ?2)")
                .bind(sku)
                .bind(fornecedor_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

fn push_sku_list(query: &mut QueryBuilder<'_, Sqlite>, skus: &[String]) {
    let mut separated = query.separated(", ");
    for sku in skus {
        separated.push_bind(sku.clone());
    }
}
