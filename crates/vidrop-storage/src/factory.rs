#[cfg(feature = "storage-cloudinary")]
use crate::{CloudinarySettings, CloudinaryStorage};
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{StorageBackend, StorageResult, VideoStorage};
use std::sync::Arc;
use vidrop_core::Config;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn VideoStorage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage = LocalStorage::new(config.upload_dir()).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(crate::StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-cloudinary")]
        StorageBackend::Cloudinary => {
            let settings = CloudinarySettings::from_config(config)?;
            let storage = CloudinaryStorage::new(settings)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-cloudinary"))]
        StorageBackend::Cloudinary => Err(crate::StorageError::ConfigError(
            "Cloudinary storage backend not available (storage-cloudinary feature not enabled)"
                .to_string(),
        )),
    }
}
