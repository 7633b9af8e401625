//! Integration tests for the submission orchestrator.
//!
//! These drive `Orchestrator::submit` against purpose-built generation tools
//! (failing, slow, generating, counting) and check what ends up in the
//! display slot and on the event bus.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;

use forge3d_core::classifier::Shape;
use forge3d_core::error::CoreError;
use forge3d_events::bus::{EVENT_DISPLAY_LOADING, EVENT_NOTIFICATION};
use forge3d_events::EventBus;
use forge3d_generator::api::GeneratorApiError;
use forge3d_generator::{
    GenerationError, GenerationReceipt, GenerationTool, ImageGeneration, TextGeneration,
};
use forge3d_pipeline::{
    DisplaySlot, ImageFile, Orchestrator, OrchestratorConfig, Submission, SubmissionState,
};

// ---------------------------------------------------------------------------
// Test tools
// ---------------------------------------------------------------------------

/// Always fails with an upstream error.
struct FailingTool;

#[async_trait]
impl GenerationTool for FailingTool {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn generate_from_text(
        &self,
        _request: &TextGeneration,
    ) -> Result<GenerationReceipt, GenerationError> {
        Err(GenerationError::Api(GeneratorApiError::ApiError {
            status: 503,
            body: "overloaded".to_string(),
        }))
    }

    async fn generate_from_image(
        &self,
        _request: &ImageGeneration,
    ) -> Result<GenerationReceipt, GenerationError> {
        Err(GenerationError::Api(GeneratorApiError::ApiError {
            status: 502,
            body: "offline".to_string(),
        }))
    }
}

/// Produces the requested asset, after `delay` for prompts containing "slow".
struct GeneratingTool {
    delay: Duration,
    calls: AtomicUsize,
}

impl GeneratingTool {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerationTool for GeneratingTool {
    fn name(&self) -> &'static str {
        "generating"
    }

    async fn generate_from_text(
        &self,
        request: &TextGeneration,
    ) -> Result<GenerationReceipt, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.description.contains("slow") {
            tokio::time::sleep(self.delay).await;
        }
        Ok(GenerationReceipt::generated(request.file_path.clone()))
    }

    async fn generate_from_image(
        &self,
        request: &ImageGeneration,
    ) -> Result<GenerationReceipt, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerationReceipt::generated(request.file_path.clone()))
    }
}

fn orchestrator(tool: Arc<dyn GenerationTool>, timeout: Duration) -> (Arc<Orchestrator>, Arc<EventBus>) {
    let events = Arc::new(EventBus::default());
    let orch = Orchestrator::new(
        tool,
        Arc::new(DisplaySlot::new()),
        Arc::clone(&events),
        OrchestratorConfig {
            timeout,
            ..OrchestratorConfig::default()
        },
    );
    (Arc::new(orch), events)
}

fn png(name: &str) -> ImageFile {
    ImageFile {
        file_name: name.to_string(),
        data_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: upstream failure falls back to a primitive and shows it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_tool_falls_back_without_error() {
    let (orch, events) = orchestrator(Arc::new(FailingTool), Duration::from_secs(60));
    let mut rx = events.subscribe();

    let outcome = orch
        .submit(Submission::Text { prompt: "a green tree".into() })
        .await
        .expect("generation failures must not escape");

    assert_eq!(outcome.state, SubmissionState::FallenBack);
    assert!(!outcome.descriptor.is_external());
    assert_eq!(outcome.descriptor.shape(), Shape::Cylinder);
    assert_eq!(outcome.descriptor.color(), "#43A047");

    let snap = orch.display().snapshot().await;
    assert_eq!(snap.descriptor, Some(outcome.descriptor));
    assert!(!snap.loading);

    let mut saw_warning = false;
    while let Ok(event) = rx.try_recv() {
        if event.event_type == EVENT_NOTIFICATION {
            saw_warning = event.payload["level"] == "warning";
        }
    }
    assert!(saw_warning, "fallback should publish a warning notification");
}

// ---------------------------------------------------------------------------
// Test: usable receipt resolves to an external asset with a fallback shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generated_receipt_resolves_to_external_asset() {
    let tool = Arc::new(GeneratingTool::new(Duration::ZERO));
    let (orch, _events) = orchestrator(tool, Duration::from_secs(60));

    let outcome = orch
        .submit(Submission::Text { prompt: "A red sports car".into() })
        .await
        .unwrap();

    assert_eq!(outcome.state, SubmissionState::Resolved);
    let reference = outcome.descriptor.asset_reference().unwrap();
    assert!(reference.starts_with("models/text_"));
    assert!(reference.ends_with(".glb"));
    assert_eq!(outcome.descriptor.shape(), Shape::Box);
    assert_eq!(outcome.descriptor.color(), "#E53935");
}

// ---------------------------------------------------------------------------
// Test: image submission labels the model from the first file name
// ---------------------------------------------------------------------------

#[tokio::test]
async fn image_submission_uses_first_file_name() {
    let tool = Arc::new(GeneratingTool::new(Duration::ZERO));
    let (orch, _events) = orchestrator(tool, Duration::from_secs(60));

    let outcome = orch
        .submit(Submission::MultiImage {
            images: vec![png("blue_ring.png"), png("side.png")],
        })
        .await
        .unwrap();

    assert_eq!(outcome.descriptor.display_name(), "blue_ring");
    assert_eq!(outcome.descriptor.shape(), Shape::Torus);
    assert_eq!(outcome.images_used, 2);
}

// ---------------------------------------------------------------------------
// Test: zero images never reach the tool
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_image_submission_does_not_call_tool() {
    let tool = Arc::new(GeneratingTool::new(Duration::ZERO));
    let (orch, events) = orchestrator(tool.clone(), Duration::from_secs(60));
    let mut rx = events.subscribe();

    assert_matches!(
        orch.submit(Submission::Image { images: vec![] }).await,
        Err(CoreError::Validation(_))
    );

    assert_eq!(tool.calls.load(Ordering::SeqCst), 0);
    assert!(orch.display().current().await.is_none());
    assert!(rx.try_recv().is_err(), "no events for rejected input");
}

// ---------------------------------------------------------------------------
// Test: a slow tool is cut off by the timeout and falls back
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn timeout_falls_back() {
    let tool = Arc::new(GeneratingTool::new(Duration::from_secs(120)));
    let (orch, _events) = orchestrator(tool, Duration::from_secs(5));

    let outcome = orch
        .submit(Submission::Text { prompt: "slow castle".into() })
        .await
        .unwrap();

    assert_eq!(outcome.state, SubmissionState::FallenBack);
    assert!(outcome.applied);
    assert_eq!(outcome.descriptor.shape(), Shape::Cylinder);
}

// ---------------------------------------------------------------------------
// Test: an earlier slow submission never overwrites a newer one
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn stale_submission_is_discarded() {
    let tool = Arc::new(GeneratingTool::new(Duration::from_secs(2)));
    let (orch, events) = orchestrator(tool, Duration::from_secs(60));
    let mut rx = events.subscribe();

    let slow = {
        let orch = Arc::clone(&orch);
        tokio::spawn(async move {
            orch.submit(Submission::Text { prompt: "slow red cat".into() }).await
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    let fast = orch
        .submit(Submission::Text { prompt: "blue donut".into() })
        .await
        .unwrap();
    assert!(fast.applied);

    let slow = slow.await.unwrap().unwrap();
    assert!(!slow.applied);
    assert!(slow.generation < fast.generation);

    let snap = orch.display().snapshot().await;
    assert_eq!(snap.descriptor, Some(fast.descriptor));
    assert!(!snap.loading);

    // The stale settlement must not publish a loading change.
    let loading_clears: Vec<u64> = std::iter::from_fn(|| rx.try_recv().ok())
        .filter(|e| e.event_type == EVENT_DISPLAY_LOADING && e.payload["loading"] == false)
        .filter_map(|e| e.payload["generation"].as_u64())
        .collect();
    assert_eq!(loading_clears, vec![fast.generation]);
}

// ---------------------------------------------------------------------------
// Test: reset discards an in-flight submission
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn reset_discards_in_flight_result() {
    let tool = Arc::new(GeneratingTool::new(Duration::from_secs(2)));
    let (orch, _events) = orchestrator(tool, Duration::from_secs(60));

    let pending = {
        let orch = Arc::clone(&orch);
        tokio::spawn(async move {
            orch.submit(Submission::Text { prompt: "slow tower".into() }).await
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    orch.reset().await;

    let outcome = pending.await.unwrap().unwrap();
    assert!(!outcome.applied);
    assert!(orch.display().current().await.is_none());
}
