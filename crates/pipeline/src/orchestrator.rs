//! Request orchestrator.
//!
//! Drives one submission through `Idle -> Submitting -> AwaitingResult ->
//! Resolved | FallenBack`. Only validation errors reach the caller: every
//! generation failure (error, timeout, unusable receipt) becomes a locally
//! classified primitive.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use forge3d_core::classifier::classify;
use forge3d_core::descriptor::{build, BuildOptions, ModelDescriptor};
use forge3d_core::error::CoreError;
use forge3d_core::generation::{asset_path_for, Quality};
use forge3d_core::ids;
use forge3d_events::bus::EVENT_DISPLAY_CHANGED;
use forge3d_events::{EventBus, NotificationLevel, StudioEvent};
use forge3d_generator::{
    GenerationError, GenerationReceipt, GenerationTool, ImageGeneration, TextGeneration,
};

use crate::display::DisplaySlot;
use crate::submission::{Dispatch, Submission};

/// Default bound on a single generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    AwaitingResult,
    Resolved,
    FallenBack,
}

impl SubmissionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::AwaitingResult => "awaiting_result",
            SubmissionState::Resolved => "resolved",
            SubmissionState::FallenBack => "fallen_back",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub asset_dir: PathBuf,
    pub timeout: Duration,
    pub quality: Quality,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("models"),
            timeout: DEFAULT_GENERATION_TIMEOUT,
            quality: Quality::default(),
        }
    }
}

/// The settled result of a submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub request_id: String,
    pub generation: u64,
    pub state: SubmissionState,
    pub descriptor: ModelDescriptor,
    /// `false` when a newer submission or a reset superseded this one.
    pub applied: bool,
    pub images_used: usize,
    pub warnings: Vec<String>,
}

pub struct Orchestrator {
    tool: Arc<dyn GenerationTool>,
    display: Arc<DisplaySlot>,
    events: Arc<EventBus>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        tool: Arc<dyn GenerationTool>,
        display: Arc<DisplaySlot>,
        events: Arc<EventBus>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            tool,
            display,
            events,
            config,
        }
    }

    pub fn display(&self) -> &Arc<DisplaySlot> {
        &self.display
    }

    pub fn tool(&self) -> &Arc<dyn GenerationTool> {
        &self.tool
    }

    /// Run one submission to completion.
    ///
    /// Returns `Err` only for invalid input, in which case no token is
    /// issued and the tool is never called.
    pub async fn submit(&self, submission: Submission) -> Result<SubmissionOutcome, CoreError> {
        let mode = submission.mode();
        let validated = submission.validate()?;
        for warning in &validated.warnings {
            tracing::warn!(mode, warning = %warning, "Submission warning");
        }

        let generation = self.display.begin().await;
        self.events.publish(StudioEvent::loading(true, generation));
        self.transition(generation, SubmissionState::Submitting);

        let request_id = match &validated.dispatch {
            Dispatch::Text { .. } => ids::new_id(ids::TEXT_PREFIX),
            Dispatch::Image { .. } => ids::new_id(ids::IMAGE_PREFIX),
        };
        let asset_path = asset_path_for(&self.config.asset_dir, &request_id)
            .to_string_lossy()
            .into_owned();

        self.transition(generation, SubmissionState::AwaitingResult);
        let result = self.dispatch(&validated.dispatch, asset_path).await;

        let classification = classify(&validated.label);
        let (state, options) = match result {
            Ok(receipt) if receipt.is_usable() => (
                SubmissionState::Resolved,
                BuildOptions::default().with_asset_reference(receipt.asset_path),
            ),
            Ok(receipt) => {
                tracing::info!(
                    generation,
                    tool = self.tool.name(),
                    status = ?receipt.status,
                    "Receipt not usable, falling back to primitive",
                );
                (SubmissionState::FallenBack, BuildOptions::default())
            }
            Err(e) => {
                tracing::warn!(
                    generation,
                    tool = self.tool.name(),
                    error = %e,
                    "Generation failed, falling back to primitive",
                );
                (SubmissionState::FallenBack, BuildOptions::default())
            }
        };

        let descriptor = build(&validated.label, classification, options);
        let applied = self.display.settle(generation, descriptor.clone()).await;
        self.transition(generation, state);

        if applied {
            self.events.publish(StudioEvent::loading(false, generation));
            self.events.publish(
                StudioEvent::new(EVENT_DISPLAY_CHANGED)
                    .with_source("descriptor", descriptor.id())
                    .with_payload(serde_json::json!({ "generation": generation })),
            );
            let (level, message) = match state {
                SubmissionState::Resolved => (NotificationLevel::Success, "3D model generated"),
                _ => (
                    NotificationLevel::Warning,
                    "Generation unavailable, showing a placeholder shape",
                ),
            };
            self.events.publish(StudioEvent::notification(level, message));
        } else {
            tracing::debug!(generation, descriptor_id = %descriptor.id(), "Discarding stale result");
        }

        Ok(SubmissionOutcome {
            request_id,
            generation,
            state,
            descriptor,
            applied,
            images_used: validated.images_used,
            warnings: validated.warnings,
        })
    }

    /// Clear the displayed model, fencing out any in-flight submission.
    pub async fn reset(&self) -> u64 {
        let generation = self.display.reset().await;
        tracing::info!(generation, "Display reset");
        self.events.publish(StudioEvent::loading(false, generation));
        self.events.publish(
            StudioEvent::new(EVENT_DISPLAY_CHANGED)
                .with_payload(serde_json::json!({ "generation": generation })),
        );
        generation
    }

    async fn dispatch(
        &self,
        dispatch: &Dispatch,
        file_path: String,
    ) -> Result<GenerationReceipt, GenerationError> {
        let quality = self.config.quality;
        let call = async {
            match dispatch {
                Dispatch::Text { prompt } => {
                    let request = TextGeneration {
                        description: prompt.clone(),
                        file_path,
                        quality,
                    };
                    self.tool.generate_from_text(&request).await
                }
                Dispatch::Image { image } => {
                    let request = ImageGeneration {
                        image_data: image.data_url.clone(),
                        file_path,
                        quality,
                    };
                    self.tool.generate_from_image(&request).await
                }
            }
        };

        tokio::time::timeout(self.config.timeout, call)
            .await
            .map_err(|_| GenerationError::TimedOut(self.config.timeout))?
    }

    fn transition(&self, generation: u64, state: SubmissionState) {
        tracing::info!(generation, state = state.as_str(), "Submission state");
        self.events
            .publish(StudioEvent::submission_state(generation, state.as_str()));
    }
}
