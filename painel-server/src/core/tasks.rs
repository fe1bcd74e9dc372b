//! Background maintenance tasks

use std::sync::Arc;

use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::core::ServerState;
use crate::enrich::EnrichmentService;

/// Interval between enrichment batch prunes
const PRUNE_INTERVAL_SECS: u64 = 60;

/// Spawn the long-running maintenance tasks
pub fn start_background_tasks(state: &ServerState, shutdown: CancellationToken) {
    if let Some(enrichment) = state.enrichment_opt() {
        tokio::spawn(prune_enrichment_batches(enrichment, shutdown));
    }
}

/// Periodically drop enrichment batches past their TTL
async fn prune_enrichment_batches(
    enrichment: Arc<EnrichmentService>,
    shutdown: CancellationToken,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(PRUNE_INTERVAL_SECS));
    interval.tick().await; // skip immediate tick

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Batch pruner shutting down");
                break;
            }
            _ = interval.tick() => {
                let removed = enrichment.prune();
                if removed > 0 {
                    tracing::debug!(removed, "Pruned idle enrichment batches");
                }
            }
        }
    }
}
