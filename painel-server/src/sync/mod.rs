//! Catalog synchronization job
//!
//! Walks the ERP's paginated product-derivation listing end-to-end, maps the
//! variant-level records and mirrors them into the local catalog with one
//! bulk upsert keyed by SKU after a complete walk. A gateway failure aborts
//! the walk before anything is written, so the mirror is either untouched or
//! fully refreshed.

use std::sync::Arc;

use magazord_client::MagazordClient;

use crate::db::models::CatalogEntry;
use crate::db::repository::CatalogRepository;
use crate::utils::AppResult;

/// Hard safety ceiling on the page walk
const MAX_PAGES: u32 = 5000;
/// Page size used for the full walk
const PAGE_LIMIT: u32 = 100;

/// Full-catalog mirror job; strictly sequential, one outstanding request
pub struct CatalogSync {
    gateway: Arc<MagazordClient>,
    repo: CatalogRepository,
}

impl CatalogSync {
    pub fn new(gateway: Arc<MagazordClient>, repo: CatalogRepository) -> Self {
        Self { gateway, repo }
    }

    /// Run the walk and the bulk upsert
    ///
    /// Returns the number of variant-level records seen upstream; rows whose
    /// derived SKU is empty count but are not persisted.
    pub async fn run(&self) -> AppResult<u64> {
        let mut page = 1u32;
        let mut has_more = true;
        let mut total = 0u64;
        let mut batch: Vec<CatalogEntry> = Vec::new();

        while has_more && page < MAX_PAGES {
            let listagem = self.gateway.list_catalog_page(page, PAGE_LIMIT).await?;

            let rows = self.gateway.map_derivacoes(&listagem.items);
            total += rows.len() as u64;
            batch.extend(
                rows.into_iter()
                    .filter(|row| !row.sku.is_empty())
                    .map(CatalogEntry::from),
            );

            has_more = listagem.has_more;
            page += 1;
        }

        let written = self.repo.upsert_all(&batch).await?;
        tracing::info!(total, written, pages = page - 1, "Catalog sync finished");
        Ok(total)
    }
}
