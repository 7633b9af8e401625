#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use forge3d_api::config::ServerConfig;
use forge3d_api::router::build_app_router;
use forge3d_api::state::AppState;
use forge3d_core::generation::Quality;
use forge3d_generator::{GenerationTool, MockTool};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        generator_url: None,
        generation_timeout_secs: 5,
        generation_quality: Quality::Medium,
        asset_dir: PathBuf::from("models"),
        work_item_ttl_secs: 600,
        work_item_max_age_secs: 3600,
        registry_sweep_interval_secs: 60,
    }
}

/// Build state around the mock tool.
pub fn test_state() -> AppState {
    AppState::new(test_config(), Arc::new(MockTool))
}

/// Build state around a custom tool.
pub fn test_state_with_tool(tool: Arc<dyn GenerationTool>) -> AppState {
    AppState::new(test_config(), tool)
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

/// Build state and router from a custom config.
pub fn build_test_app_with_config(
    config: ServerConfig,
    tool: Arc<dyn GenerationTool>,
) -> (AppState, Router) {
    let state = AppState::new(config.clone(), tool);
    let app = build_app_router(state.clone(), &config);
    (state, app)
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve_local(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
