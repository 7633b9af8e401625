//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`StudioEvent`]s: submission
//! state transitions, loading visibility, and transient notifications. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use forge3d_core::types::Timestamp;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A submission moved to a new orchestrator state.
pub const EVENT_SUBMISSION_STATE: &str = "submission.state";
/// The display loading flag changed.
pub const EVENT_DISPLAY_LOADING: &str = "display.loading";
/// The displayed descriptor was replaced or cleared.
pub const EVENT_DISPLAY_CHANGED: &str = "display.changed";
/// A transient, user-facing message.
pub const EVENT_NOTIFICATION: &str = "notification";

/// Severity of a [`EVENT_NOTIFICATION`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// StudioEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred in the studio.
///
/// Constructed via [`StudioEvent::new`] or one of the typed helpers and
/// enriched with [`with_source`](StudioEvent::with_source) and
/// [`with_payload`](StudioEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioEvent {
    /// Dot-separated event name, e.g. `"submission.state"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"submission"`, `"descriptor"`).
    pub source_entity_type: Option<String>,

    /// Optional source entity id.
    pub source_entity_id: Option<String>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: Timestamp,
}

impl StudioEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Attach a source entity to the event.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id.into());
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// A transient notification for the user.
    pub fn notification(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self::new(EVENT_NOTIFICATION).with_payload(serde_json::json!({
            "level": level,
            "message": message.into(),
        }))
    }

    /// The loading flag is now `loading`.
    pub fn loading(loading: bool, generation: u64) -> Self {
        Self::new(EVENT_DISPLAY_LOADING).with_payload(serde_json::json!({
            "loading": loading,
            "generation": generation,
        }))
    }

    /// Submission `generation` entered `state`.
    pub fn submission_state(generation: u64, state: &str) -> Self {
        Self::new(EVENT_SUBMISSION_STATE)
            .with_source("submission", generation.to_string())
            .with_payload(serde_json::json!({
                "generation": generation,
                "state": state,
            }))
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use forge3d_events::bus::{EventBus, StudioEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(StudioEvent::new("display.changed"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<StudioEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: StudioEvent) {
        tracing::trace!(event_type = %event.event_type, "Publishing studio event");
        // Ignore the SendError: it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = StudioEvent::new("test.created")
            .with_source("descriptor", "model_1_abc")
            .with_payload(serde_json::json!({"key": "value"}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "test.created");
        assert_eq!(received.source_entity_type.as_deref(), Some("descriptor"));
        assert_eq!(received.source_entity_id.as_deref(), Some("model_1_abc"));
        assert_eq!(received.payload["key"], "value");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(StudioEvent::loading(true, 3));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event_type, EVENT_DISPLAY_LOADING);
        assert_eq!(e2.payload["generation"], 3);
        assert_eq!(e2.payload["loading"], true);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(StudioEvent::new("orphan.event"));
    }

    #[test]
    fn notification_payload_carries_level_and_message() {
        let event = StudioEvent::notification(NotificationLevel::Warning, "fell back");
        assert_eq!(event.event_type, EVENT_NOTIFICATION);
        assert_eq!(event.payload["level"], "warning");
        assert_eq!(event.payload["message"], "fell back");
    }

    #[test]
    fn submission_state_is_sourced_by_generation() {
        let event = StudioEvent::submission_state(7, "awaiting_result");
        assert_eq!(event.source_entity_type.as_deref(), Some("submission"));
        assert_eq!(event.source_entity_id.as_deref(), Some("7"));
        assert_eq!(event.payload["state"], "awaiting_result");
    }
}
