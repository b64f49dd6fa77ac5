//! Vidrop Storage Library
//!
//! This crate provides the [`VideoStorage`] abstraction and its two backends:
//! local disk (streamed) and Cloudinary (buffered, then streamed to the API).
//!
//! # Naming
//!
//! Both backends derive the stored identifier from the original filename and
//! the upload time in unix milliseconds:
//!
//! - **Local**: `{basename}-{millis}{extension}` inside the upload directory
//! - **Cloudinary**: `{folder}/{basename}-{millis}` as the public id, overwritten if it exists
//!
//! Collision avoidance is timestamp-only. Name derivation is centralized in the
//! `naming` module so both backends stay consistent.

#[cfg(feature = "storage-cloudinary")]
pub mod cloudinary;
pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod naming;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "storage-cloudinary")]
pub use cloudinary::{CloudinarySettings, CloudinaryStorage, CloudinaryUploadResult, UploadOptions};
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{StorageError, StorageResult, StoredVideo, UploadReader, VideoStorage, VideoUpload};
pub use vidrop_core::StorageBackend;
