//! Work-item registry for the asynchronous generation endpoints.
//!
//! Items advance through `pending -> processing -> completed` on simulated
//! timers ([`spawn_simulation`]). Settled items stay pollable for the
//! configured TTL and are then evicted by [`WorkRegistry::sweep`]; items
//! stuck in a non-terminal status past the maximum age are marked failed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;

use forge3d_core::classifier::{classify, Shape};
use forge3d_core::generation::StatusSchedule;
use forge3d_core::ids;
use forge3d_core::types::{RequestId, Timestamp};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkKind {
    Text,
    Image,
}

impl WorkKind {
    fn id_prefix(self) -> &'static str {
        match self {
            WorkKind::Text => ids::TEXT_PREFIX,
            WorkKind::Image => ids::IMAGE_PREFIX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl WorkStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkStatus::Completed | WorkStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkResult {
    pub model_id: String,
    pub model_type: Shape,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkItem {
    pub request_id: RequestId,
    pub kind: WorkKind,
    pub prompt: String,
    pub status: WorkStatus,
    pub result: Option<WorkResult>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct RegistryConfig {
    /// How long settled items remain pollable.
    pub ttl: Duration,
    /// Non-terminal items older than this are marked failed.
    pub max_age: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_age: Duration::from_secs(3600),
        }
    }
}

/// Counts from one [`WorkRegistry::sweep`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub expired: usize,
    pub evicted: usize,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct WorkRegistry {
    items: RwLock<HashMap<RequestId, WorkItem>>,
    config: RegistryConfig,
}

impl WorkRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Register a new pending item.
    pub async fn create(&self, kind: WorkKind, prompt: impl Into<String>) -> WorkItem {
        let now = chrono::Utc::now();
        let item = WorkItem {
            request_id: ids::new_id(kind.id_prefix()),
            kind,
            prompt: prompt.into(),
            status: WorkStatus::Pending,
            result: None,
            created_at: now,
            updated_at: now,
        };
        self.items
            .write()
            .await
            .insert(item.request_id.clone(), item.clone());
        tracing::debug!(request_id = %item.request_id, kind = ?kind, "Work item created");
        item
    }

    pub async fn get(&self, request_id: &str) -> Option<WorkItem> {
        self.items.read().await.get(request_id).cloned()
    }

    /// Move an item to `status`.
    ///
    /// Completing an item attaches the classification of its prompt.
    /// Terminal items are not changed. Returns the updated item, or `None`
    /// if it no longer exists.
    pub async fn update_status(&self, request_id: &str, status: WorkStatus) -> Option<WorkItem> {
        let mut items = self.items.write().await;
        let item = items.get_mut(request_id)?;
        if item.status.is_terminal() {
            return Some(item.clone());
        }

        item.status = status;
        item.updated_at = chrono::Utc::now();
        if status == WorkStatus::Completed {
            let classification = classify(&item.prompt);
            item.result = Some(WorkResult {
                model_id: item.request_id.clone(),
                model_type: classification.shape,
                color: classification.color,
            });
        }
        tracing::debug!(request_id, status = ?status, "Work item updated");
        Some(item.clone())
    }

    pub async fn remove(&self, request_id: &str) -> Option<WorkItem> {
        self.items.write().await.remove(request_id)
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Expire and evict against the current time.
    pub async fn sweep(&self) -> SweepStats {
        self.sweep_at(chrono::Utc::now()).await
    }

    /// Expire stale non-terminal items and evict settled items past the TTL,
    /// as of `now`.
    pub async fn sweep_at(&self, now: Timestamp) -> SweepStats {
        let max_age = chrono::Duration::from_std(self.config.max_age).unwrap_or(chrono::Duration::MAX);
        let ttl = chrono::Duration::from_std(self.config.ttl).unwrap_or(chrono::Duration::MAX);
        let mut stats = SweepStats::default();

        let mut items = self.items.write().await;
        for item in items.values_mut() {
            if !item.status.is_terminal() && now - item.created_at > max_age {
                item.status = WorkStatus::Failed;
                item.updated_at = now;
                stats.expired += 1;
            }
        }

        let before = items.len();
        items.retain(|_, item| !(item.status.is_terminal() && now - item.updated_at > ttl));
        stats.evicted = before - items.len();

        stats
    }
}

/// Advance an item through the simulated schedule on a background task.
pub fn spawn_simulation(
    registry: Arc<WorkRegistry>,
    request_id: RequestId,
    schedule: StatusSchedule,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(schedule.until_processing).await;
        if registry
            .update_status(&request_id, WorkStatus::Processing)
            .await
            .is_none()
        {
            return;
        }

        tokio::time::sleep(schedule.until_completed).await;
        registry
            .update_status(&request_id, WorkStatus::Completed)
            .await;
    })
}

#[cfg(test)]
mod tests {
    use forge3d_core::classifier::DEFAULT_COLOR;
    use forge3d_core::generation::{IMAGE_SCHEDULE, TEXT_SCHEDULE};

    use super::*;

    fn registry() -> Arc<WorkRegistry> {
        Arc::new(WorkRegistry::new(RegistryConfig::default()))
    }

    #[tokio::test]
    async fn create_and_get() {
        let reg = registry();
        let item = reg.create(WorkKind::Text, "a red car").await;
        assert!(item.request_id.starts_with("text_"));
        assert_eq!(item.status, WorkStatus::Pending);

        let fetched = reg.get(&item.request_id).await.unwrap();
        assert_eq!(fetched.prompt, "a red car");
        assert!(reg.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn completion_attaches_classification() {
        let reg = registry();
        let item = reg.create(WorkKind::Text, "a red sports car").await;
        let done = reg
            .update_status(&item.request_id, WorkStatus::Completed)
            .await
            .unwrap();
        let result = done.result.unwrap();
        assert_eq!(result.model_id, item.request_id);
        assert_eq!(result.model_type, Shape::Box);
        assert_eq!(result.color, "#E53935");
    }

    #[tokio::test]
    async fn terminal_status_is_final() {
        let reg = registry();
        let item = reg.create(WorkKind::Image, "x").await;
        reg.update_status(&item.request_id, WorkStatus::Failed).await;
        let after = reg
            .update_status(&item.request_id, WorkStatus::Processing)
            .await
            .unwrap();
        assert_eq!(after.status, WorkStatus::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn text_schedule_advances_status() {
        let reg = registry();
        let item = reg.create(WorkKind::Text, "tree").await;
        let id = item.request_id.clone();
        let handle = spawn_simulation(reg.clone(), id.clone(), TEXT_SCHEDULE);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(reg.get(&id).await.unwrap().status, WorkStatus::Pending);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(reg.get(&id).await.unwrap().status, WorkStatus::Processing);

        handle.await.unwrap();
        let done = reg.get(&id).await.unwrap();
        assert_eq!(done.status, WorkStatus::Completed);
        assert_eq!(done.result.unwrap().model_type, Shape::Cylinder);
    }

    #[tokio::test(start_paused = true)]
    async fn image_schedule_uses_longer_delays() {
        let reg = registry();
        let item = reg.create(WorkKind::Image, "Image-based generation").await;
        let id = item.request_id.clone();
        spawn_simulation(reg.clone(), id.clone(), IMAGE_SCHEDULE);

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(reg.get(&id).await.unwrap().status, WorkStatus::Pending);

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert_eq!(reg.get(&id).await.unwrap().status, WorkStatus::Processing);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let done = reg.get(&id).await.unwrap();
        assert_eq!(done.status, WorkStatus::Completed);
        assert_eq!(done.result.unwrap().color, DEFAULT_COLOR);
    }

    #[tokio::test]
    async fn sweep_evicts_settled_items_after_ttl() {
        let reg = registry();
        let settled = reg.create(WorkKind::Text, "ball").await;
        let pending = reg.create(WorkKind::Text, "rock").await;
        reg.update_status(&settled.request_id, WorkStatus::Completed).await;

        let stats = reg.sweep().await;
        assert_eq!(stats, SweepStats::default());

        let later = chrono::Utc::now() + chrono::Duration::seconds(601);
        let stats = reg.sweep_at(later).await;
        assert_eq!(stats.evicted, 1);
        assert!(reg.get(&settled.request_id).await.is_none());
        assert!(reg.get(&pending.request_id).await.is_some());
    }

    #[tokio::test]
    async fn sweep_fails_items_past_max_age() {
        let reg = registry();
        let item = reg.create(WorkKind::Text, "castle").await;

        let later = chrono::Utc::now() + chrono::Duration::seconds(3601);
        let stats = reg.sweep_at(later).await;
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.evicted, 0);
        assert_eq!(reg.get(&item.request_id).await.unwrap().status, WorkStatus::Failed);

        let much_later = later + chrono::Duration::seconds(601);
        assert_eq!(reg.sweep_at(much_later).await.evicted, 1);
        assert!(reg.is_empty().await);
    }

    #[tokio::test]
    async fn simulation_stops_when_item_removed() {
        let reg = registry();
        let item = reg.create(WorkKind::Text, "desk").await;
        reg.remove(&item.request_id).await;
        assert!(reg
            .update_status(&item.request_id, WorkStatus::Processing)
            .await
            .is_none());
        assert_eq!(reg.len().await, 0);
    }
}
