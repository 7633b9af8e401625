//! The display slot: the single descriptor currently shown to the user.
//!
//! Every accepted submission takes a generation token from [`DisplaySlot::begin`].
//! A result is applied only if its token is still the latest one, so a slow
//! earlier submission can never overwrite a newer one. [`DisplaySlot::reset`]
//! also advances the token.

use serde::Serialize;
use tokio::sync::RwLock;

use forge3d_core::descriptor::ModelDescriptor;

#[derive(Debug, Default)]
struct SlotState {
    current: Option<ModelDescriptor>,
    loading: bool,
    generation: u64,
}

/// Point-in-time view of the slot.
#[derive(Debug, Clone, Serialize)]
pub struct DisplaySnapshot {
    pub descriptor: Option<ModelDescriptor>,
    pub loading: bool,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct DisplaySlot {
    state: RwLock<SlotState>,
}

impl DisplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new generation token and mark the slot as loading.
    pub async fn begin(&self) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.loading = true;
        state.generation
    }

    /// Apply `descriptor` if `token` is still the latest.
    ///
    /// Returns `false`, leaving the slot untouched, for stale tokens.
    pub async fn settle(&self, token: u64, descriptor: ModelDescriptor) -> bool {
        let mut state = self.state.write().await;
        if token != state.generation {
            return false;
        }
        state.current = Some(descriptor);
        state.loading = false;
        true
    }

    /// Clear the view. Returns the new token.
    pub async fn reset(&self) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.current = None;
        state.loading = false;
        state.generation
    }

    pub async fn current(&self) -> Option<ModelDescriptor> {
        self.state.read().await.current.clone()
    }

    pub async fn snapshot(&self) -> DisplaySnapshot {
        let state = self.state.read().await;
        DisplaySnapshot {
            descriptor: state.current.clone(),
            loading: state.loading,
            generation: state.generation,
        }
    }
}
