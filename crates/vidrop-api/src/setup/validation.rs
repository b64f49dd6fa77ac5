//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use vidrop_core::{Config, StorageBackend};

/// Validate critical configuration values
///
/// Delegates the field checks to [`Config::validate`] and warns about settings
/// that are legal but risky.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if !config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        tracing::debug!("CORS allows all origins (development mode)");
    }

    if config.storage_backend() == StorageBackend::Cloudinary
        && config.cloudinary_timeout_secs().is_none()
    {
        tracing::warn!(
            "CLOUDINARY_TIMEOUT_SECS not set - remote uploads may wait indefinitely"
        );
    }

    Ok(())
}
