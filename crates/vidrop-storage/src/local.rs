use crate::naming::{stored_file_name, unix_millis};
use crate::traits::{StorageError, StorageResult, StoredVideo, VideoStorage, VideoUpload};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use vidrop_core::models::StoredLocation;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    upload_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `upload_dir` - Directory receiving uploaded videos (e.g., "uploads")
    pub async fn new(upload_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let upload_dir = upload_dir.into();

        fs::create_dir_all(&upload_dir).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                upload_dir.display(),
                e
            ))
        })?;

        Ok(LocalStorage { upload_dir })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Recreate the upload directory if it was removed while the server runs
    async fn ensure_upload_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.upload_dir).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create storage directory {}: {}",
                self.upload_dir.display(),
                e
            ))
        })
    }

    /// Create `stored_name` in the upload directory and stream the body into it.
    ///
    /// An existing file with that name is left alone and the upload fails.
    async fn store_with_name(
        &self,
        stored_name: String,
        upload: &mut VideoUpload<'_>,
    ) -> StorageResult<StoredVideo> {
        let path = self.upload_dir.join(&stored_name);
        let start = std::time::Instant::now();

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let size_bytes = match write_body(file, &path, upload).await {
            Ok(size) => size,
            Err(e) => {
                // Only the file created above is removed
                if let Err(remove_err) = fs::remove_file(&path).await {
                    if remove_err.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(
                            error = %remove_err,
                            path = %path.display(),
                            "Failed to remove partial upload"
                        );
                    }
                }
                return Err(e);
            }
        };

        tracing::info!(
            path = %path.display(),
            stored_name = %stored_name,
            size_bytes = size_bytes,
            duration_ms = start.elapsed().as_millis(),
            "Local storage upload successful"
        );

        Ok(StoredVideo {
            location: StoredLocation::Local {
                stored_name,
                path: path.display().to_string(),
            },
            size_bytes,
        })
    }
}

async fn write_body(
    mut file: fs::File,
    path: &Path,
    upload: &mut VideoUpload<'_>,
) -> StorageResult<u64> {
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut written: u64 = 0;
    loop {
        let read = upload
            .body
            .read(&mut buffer)
            .await
            .map_err(StorageError::BodyRead)?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read]).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;
        written += read as u64;
    }

    file.sync_all().await.map_err(|e| {
        StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
    })?;

    Ok(written)
}

#[async_trait]
impl VideoStorage for LocalStorage {
    async fn store(&self, mut upload: VideoUpload<'_>) -> StorageResult<StoredVideo> {
        self.ensure_upload_dir().await?;

        let stored_name = stored_file_name(&upload.original_name, unix_millis());
        self.store_with_name(stored_name, &mut upload).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
