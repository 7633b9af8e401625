/// Opaque string identifier for descriptors and work items.
pub type RequestId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
