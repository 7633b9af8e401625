use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Ping studio clients every 30 seconds, pruning dead connections, until
/// `cancel` fires.
pub fn start_heartbeat(
    ws_manager: Arc<WsManager>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let dropped = ws_manager.ping_all().await;
                    let remaining = ws_manager.connection_count().await;
                    if dropped > 0 {
                        tracing::info!(dropped, remaining, "Heartbeat pruned closed WebSockets");
                    } else {
                        tracing::trace!(remaining, "Heartbeat ping");
                    }
                }
            }
        }
    })
}
