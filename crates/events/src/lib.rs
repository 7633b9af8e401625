//! forge3d event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`StudioEvent`]: the event envelope pushed to WebSocket clients.

pub mod bus;

pub use bus::{EventBus, NotificationLevel, StudioEvent};
