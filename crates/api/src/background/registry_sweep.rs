//! Periodic expiry and eviction of generation work items.
//!
//! Runs [`WorkRegistry::sweep`] on a fixed interval using
//! `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use forge3d_pipeline::WorkRegistry;

use crate::config::MIN_SWEEP_INTERVAL;

/// Run the registry sweep loop until `cancel` is triggered.
///
/// `every` is raised to [`MIN_SWEEP_INTERVAL`] if shorter.
pub async fn run(registry: Arc<WorkRegistry>, every: Duration, cancel: CancellationToken) {
    let every = every.max(MIN_SWEEP_INTERVAL);
    tracing::info!(interval_secs = every.as_secs(), "Registry sweep job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Registry sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                let stats = registry.sweep().await;
                if stats.expired > 0 || stats.evicted > 0 {
                    tracing::info!(
                        expired = stats.expired,
                        evicted = stats.evicted,
                        "Registry sweep: cleaned up work items"
                    );
                } else {
                    tracing::debug!("Registry sweep: nothing to clean up");
                }
            }
        }
    }
}
