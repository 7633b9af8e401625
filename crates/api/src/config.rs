use std::path::PathBuf;
use std::time::Duration;

use forge3d_core::generation::Quality;
use forge3d_pipeline::registry::RegistryConfig;
use forge3d_pipeline::OrchestratorConfig;

/// Shortest registry sweep interval; `0` in the environment is raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`).
    pub request_timeout_secs: u64,
    /// Base URL of a remote generation service. `None` uses the in-process mock.
    pub generator_url: Option<String>,
    /// Upper bound on a single generation call, in seconds (default: `60`).
    pub generation_timeout_secs: u64,
    /// Quality requested from the generation tool (default: `medium`).
    pub generation_quality: Quality,
    /// Directory generated assets are written beneath (default: `models`).
    pub asset_dir: PathBuf,
    /// How long settled work items stay pollable, in seconds (default: `600`).
    pub work_item_ttl_secs: u64,
    /// Age after which unsettled work items are failed, in seconds (default: `3600`).
    pub work_item_max_age_secs: u64,
    /// Interval between registry sweeps, in seconds (default: `60`).
    pub registry_sweep_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                    |
    /// |--------------------------------|----------------------------|
    /// | `HOST`                         | `0.0.0.0`                  |
    /// | `PORT`                         | `3000`                     |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`         | `120`                      |
    /// | `GENERATOR_URL`                | unset (mock tool)          |
    /// | `GENERATION_TIMEOUT_SECS`      | `60`                       |
    /// | `GENERATION_QUALITY`           | `medium`                   |
    /// | `ASSET_DIR`                    | `models`                   |
    /// | `WORK_ITEM_TTL_SECS`           | `600`                      |
    /// | `WORK_ITEM_MAX_AGE_SECS`       | `3600`                     |
    /// | `REGISTRY_SWEEP_INTERVAL_SECS` | `60`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = secs_from_env("REQUEST_TIMEOUT_SECS", 120);

        let generator_url = std::env::var("GENERATOR_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let generation_timeout_secs = secs_from_env("GENERATION_TIMEOUT_SECS", 60);

        let generation_quality: Quality = std::env::var("GENERATION_QUALITY")
            .unwrap_or_else(|_| "medium".into())
            .parse()
            .expect("GENERATION_QUALITY must be 'medium' or 'high'");

        let asset_dir = PathBuf::from(std::env::var("ASSET_DIR").unwrap_or_else(|_| "models".into()));

        let work_item_ttl_secs = secs_from_env("WORK_ITEM_TTL_SECS", 600);
        let work_item_max_age_secs = secs_from_env("WORK_ITEM_MAX_AGE_SECS", 3600);
        let registry_sweep_interval_secs = secs_from_env("REGISTRY_SWEEP_INTERVAL_SECS", 60);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            generator_url,
            generation_timeout_secs,
            generation_quality,
            asset_dir,
            work_item_ttl_secs,
            work_item_max_age_secs,
            registry_sweep_interval_secs,
        }
    }

    /// Upper bound on one generation tool call.
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Period of the registry sweep, never below [`MIN_SWEEP_INTERVAL`].
    pub fn registry_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.registry_sweep_interval_secs).max(MIN_SWEEP_INTERVAL)
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            asset_dir: self.asset_dir.clone(),
            timeout: self.generation_timeout(),
            quality: self.generation_quality,
        }
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            ttl: Duration::from_secs(self.work_item_ttl_secs),
            max_age: Duration::from_secs(self.work_item_max_age_secs),
        }
    }
}

fn secs_from_env(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid u64")),
        Err(_) => default,
    }
}
