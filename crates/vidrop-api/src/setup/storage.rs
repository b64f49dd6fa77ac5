//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use vidrop_core::Config;
use vidrop_storage::{create_storage, VideoStorage};

/// Create the configured storage backend
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn VideoStorage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
