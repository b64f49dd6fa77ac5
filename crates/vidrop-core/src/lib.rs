//! Vidrop Core Library
//!
//! This crate provides the configuration, error taxonomy, response models and
//! upload validation shared by the storage backends and the HTTP API.

pub mod config;
pub mod error;
pub mod filename;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploadServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
pub use validation::{ValidationError, VideoValidator};
