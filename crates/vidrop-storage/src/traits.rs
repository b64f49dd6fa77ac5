//! Storage abstraction trait
//!
//! This module defines the VideoStorage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;
use vidrop_core::models::StoredLocation;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Reading the incoming request body failed (client disconnect, size limit, bad framing)
    #[error("Failed to read upload body: {0}")]
    BodyRead(#[source] std::io::Error),

    /// The remote service answered with an error; the text is the service's own message
    #[error("{0}")]
    Remote(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte source for an upload; usually the multipart file field of the request.
pub type UploadReader<'a> = Pin<Box<dyn AsyncRead + Send + 'a>>;

/// A validated upload handed to a backend
pub struct VideoUpload<'a> {
    /// Filename as declared by the client
    pub original_name: String,
    /// MIME type as declared by the client
    pub mime_type: String,
    pub body: UploadReader<'a>,
}

/// Outcome of a successful store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredVideo {
    pub location: StoredLocation,
    /// Bytes read from the upload body
    pub size_bytes: u64,
}

/// Storage abstraction trait
///
/// Backends consume the upload body exactly once. The local backend streams it
/// to disk; the Cloudinary backend buffers it in memory before transfer.
#[async_trait]
pub trait VideoStorage: Send + Sync {
    /// Persist the upload and report where it went
    async fn store(&self, upload: VideoUpload<'_>) -> StorageResult<StoredVideo>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
