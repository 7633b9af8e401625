use std::sync::Arc;

use forge3d_events::EventBus;
use forge3d_generator::api::GeneratorApi;
use forge3d_generator::{GenerationTool, MockTool, RemoteTool};
use forge3d_pipeline::{DisplaySlot, Orchestrator, WorkRegistry};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Event bus for studio events (loading, state, notifications).
    pub event_bus: Arc<EventBus>,
    /// Submission orchestrator; owns the generation tool and display slot.
    pub orchestrator: Arc<Orchestrator>,
    /// Asynchronous generation requests.
    pub registry: Arc<WorkRegistry>,
}

impl AppState {
    /// Wire up state around the given generation tool.
    pub fn new(config: ServerConfig, tool: Arc<dyn GenerationTool>) -> Self {
        let event_bus = Arc::new(EventBus::default());
        let orchestrator = Arc::new(Orchestrator::new(
            tool,
            Arc::new(DisplaySlot::new()),
            Arc::clone(&event_bus),
            config.orchestrator_config(),
        ));
        let registry = Arc::new(WorkRegistry::new(config.registry_config()));

        Self {
            config: Arc::new(config),
            ws_manager: Arc::new(WsManager::new()),
            event_bus,
            orchestrator,
            registry,
        }
    }
}

/// The generation tool selected by configuration.
///
/// A configured `GENERATOR_URL` selects the remote tool; otherwise the mock.
pub fn tool_from_config(config: &ServerConfig) -> Arc<dyn GenerationTool> {
    match &config.generator_url {
        Some(url) => {
            tracing::info!(generator_url = %url, "Using remote generation tool");
            Arc::new(RemoteTool::new(GeneratorApi::new(url.clone())))
        }
        None => {
            tracing::info!("GENERATOR_URL not set, using mock generation tool");
            Arc::new(MockTool)
        }
    }
}
