//! Event-to-WebSocket routing.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use forge3d_events::StudioEvent;

use crate::ws::WsManager;

/// Forwards studio events to WebSocket clients.
///
/// There are no per-user targets: the studio has a single shared view, so
/// every event goes to every connection.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// The loop exits when `cancel` fires or the channel is closed (i.e. the
    /// [`EventBus`](forge3d_events::EventBus) is dropped).
    pub async fn run(
        self,
        mut receiver: broadcast::Receiver<StudioEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            let received = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Notification router stopping");
                    break;
                }
                received = receiver.recv() => received,
            };

            match received {
                Ok(event) => self.deliver(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    async fn deliver(&self, event: &StudioEvent) {
        match serde_json::to_string(event) {
            Ok(text) => self.ws_manager.broadcast(Message::Text(text.into())).await,
            Err(e) => {
                tracing::error!(error = %e, event_type = %event.event_type, "Failed to serialize event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use forge3d_events::{EventBus, NotificationLevel};

    use super::*;

    #[tokio::test]
    async fn events_are_broadcast_as_json_text() {
        let ws_manager = Arc::new(WsManager::new());
        let mut rx = ws_manager.add("conn-1".to_string()).await;

        let bus = EventBus::default();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(
            NotificationRouter::new(Arc::clone(&ws_manager)).run(bus.subscribe(), cancel.clone()),
        );

        bus.publish(StudioEvent::notification(NotificationLevel::Success, "done"));

        let Some(Message::Text(text)) = rx.recv().await else {
            panic!("expected a text frame");
        };
        let json: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(json["event_type"], "notification");
        assert_eq!(json["payload"]["message"], "done");

        cancel.cancel();
        handle.await.unwrap();
    }
}
