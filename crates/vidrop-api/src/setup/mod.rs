//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use crate::telemetry::{init_telemetry, LogFormat};
use anyhow::{Context, Result};
use std::sync::Arc;
use vidrop_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first so configuration problems are logged
    init_telemetry(LogFormat::from_env())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Validate configuration - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        "Configuration loaded and validated successfully"
    );

    let state = build_state(config).await?;

    // Setup routes
    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}

/// Create the storage backend and assemble the shared state
pub async fn build_state(config: Config) -> Result<Arc<AppState>> {
    let storage = storage::setup_storage(&config).await?;
    Ok(Arc::new(AppState::new(config, storage)))
}
