//! Event delivery to browsers.
//!
//! The [`NotificationRouter`] subscribes to the event bus and pushes studio
//! events to every connected WebSocket client.

pub mod router;

pub use router::NotificationRouter;
