//! Live enrichment pool
//!
//! Overlays live stock/cost/price figures onto a set of SKUs the operator is
//! already looking at. A fixed pool of workers pulls SKUs from a shared claim
//! cursor and merges results keyed by SKU as they arrive; consumers poll the
//! converging batch, tolerating partial and out-of-order fill-in.
//!
//! Workers hold an `Arc` of their own batch, so workers of an abandoned batch
//! keep writing into that batch only and can never touch a newer row set.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use tokio::time::{Duration, Instant};

use magazord_client::{GatewayError, GatewayResult, MagazordClient};

/// Fixed worker pool size
const WORKERS: usize = 4;
/// Pause between requests, regardless of outcome
const THROTTLE_MS: u64 = 120;
/// Pause before retrying the same SKU after an upstream 429
const RATE_LIMIT_PAUSE_MS: u64 = 800;
/// Upstream row limit for the per-SKU inventory query
const ESTOQUE_LIMIT: u32 = 100;
/// Batches older than this are pruned by the maintenance task
const BATCH_TTL_SECS: u64 = 600;

/// Live figures merged into one row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRow {
    pub sku: String,
    pub estoque_atual: f64,
    pub estoque_reservado: f64,
    pub custo_medio: f64,
    pub preco: Option<f64>,
}

/// Poll result for one batch
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSnapshot {
    pub lote: u64,
    /// Merged rows in the order the SKUs were submitted; missing entries have
    /// not been fetched (yet, or at all after a swallowed failure)
    pub rows: Vec<LiveRow>,
    pub completo: bool,
}

/// One enrichment run over an ordered SKU list
struct EnrichmentBatch {
    skus: Vec<String>,
    /// Next unclaimed index; fetch_add hands each SKU to exactly one worker
    cursor: AtomicUsize,
    /// Merged results keyed by SKU
    rows: DashMap<String, LiveRow>,
    workers_done: AtomicUsize,
    started: Instant,
}

impl EnrichmentBatch {
    fn new(skus: Vec<String>) -> Self {
        Self {
            skus,
            cursor: AtomicUsize::new(0),
            rows: DashMap::new(),
            workers_done: AtomicUsize::new(0),
            started: Instant::now(),
        }
    }

    fn is_complete(&self) -> bool {
        self.workers_done.load(Ordering::SeqCst) == WORKERS
    }
}

/// Spawns and tracks enrichment batches
pub struct EnrichmentService {
    gateway: Arc<MagazordClient>,
    batches: DashMap<u64, Arc<EnrichmentBatch>>,
    next_id: AtomicU64,
}

impl EnrichmentService {
    pub fn new(gateway: Arc<MagazordClient>) -> Self {
        Self {
            gateway,
            batches: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Start a batch over the given SKUs; returns its id immediately while
    /// the workers run in the background
    pub fn start(&self, skus: Vec<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let batch = Arc::new(EnrichmentBatch::new(skus));
        self.batches.insert(id, batch.clone());

        for worker in 0..WORKERS {
            let gateway = self.gateway.clone();
            let batch = batch.clone();
            tokio::spawn(run_worker(worker, gateway, batch));
        }

        tracing::debug!(lote = id, "Enrichment batch started");
        id
    }

    /// Current merged state of a batch
    pub fn snapshot(&self, id: u64) -> Option<BatchSnapshot> {
        let batch = self.batches.get(&id)?;
        let rows = batch
            .skus
            .iter()
            .filter_map(|sku| batch.rows.get(sku).map(|row| row.clone()))
            .collect();
        Some(BatchSnapshot {
            lote: id,
            rows,
            completo: batch.is_complete(),
        })
    }

    /// Drop batches past the idle TTL; returns how many were removed
    pub fn prune(&self) -> usize {
        let before = self.batches.len();
        self.batches
            .retain(|_, batch| batch.started.elapsed() < Duration::from_secs(BATCH_TTL_SECS));
        before - self.batches.len()
    }
}

async fn run_worker(worker: usize, gateway: Arc<MagazordClient>, batch: Arc<EnrichmentBatch>) {
    loop {
        // Claim the next unclaimed index; no index is handed out twice
        let index = batch.cursor.fetch_add(1, Ordering::SeqCst);
        let Some(sku) = batch.skus.get(index) else {
            break;
        };

        // A 429 re-enters this loop for the same SKU without advancing
        loop {
            match fetch_live(&gateway, sku).await {
                Ok(row) => {
                    batch.rows.insert(sku.clone(), row);
                }
                Err(err) if err.is_rate_limit() => {
                    tracing::debug!(%sku, "Upstream throttled, retrying same SKU");
                    tokio::time::sleep(Duration::from_millis(RATE_LIMIT_PAUSE_MS)).await;
                    continue;
                }
                Err(err) => {
                    // Swallowed: the row stays without live data
                    tracing::warn!(%sku, error = %err, "Live fetch failed");
                }
            }
            break;
        }

        tokio::time::sleep(Duration::from_millis(THROTTLE_MS)).await;
    }

    tracing::trace!(worker, "Enrichment worker exhausted the cursor");
    let done = batch.workers_done.fetch_add(1, Ordering::SeqCst) + 1;
    if done == WORKERS {
        tracing::debug!(skus = batch.skus.len(), "Enrichment batch complete");
    }
}

/// Live figures for one SKU: stock from the inventory listing (first row),
/// price from the configured price list
async fn fetch_live(gateway: &MagazordClient, sku: &str) -> GatewayResult<LiveRow> {
    let estoque = gateway.fetch_inventory(sku, ESTOQUE_LIMIT).await?;

    let preco = match gateway.fetch_price(sku).await {
        Ok(preco) => preco,
        Err(err) if err.is_rate_limit() => return Err(err),
        // Price list not configured: stock figures still merge
        Err(GatewayError::Config(_)) => None,
        Err(err) => {
            tracing::debug!(%sku, error = %err, "Price fetch failed");
            None
        }
    };

    let figures = estoque.into_iter().next();
    Ok(LiveRow {
        sku: sku.to_string(),
        estoque_atual: figures.as_ref().map(|f| f.estoque_atual).unwrap_or(0.0),
        estoque_reservado: figures
            .as_ref()
            .map(|f| f.estoque_reservado)
            .unwrap_or(0.0),
        custo_medio: figures.as_ref().map(|f| f.custo_medio).unwrap_or(0.0),
        preco,
    })
}
