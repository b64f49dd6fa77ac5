//! Common utilities for the video upload handler

use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use futures::{future, TryStreamExt};
use std::io;
use tokio_util::io::StreamReader;
use vidrop_core::AppError;
use vidrop_storage::UploadReader;

/// Raised by the field reader when the file part grows beyond the size limit
#[derive(Debug, thiserror::Error)]
#[error("File exceeds maximum allowed size of {max_bytes} bytes")]
pub struct FileSizeExceeded {
    pub max_bytes: usize,
}

/// Client-declared metadata of a multipart file field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFieldInfo {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
}

/// Read the file metadata of a field; `None` for plain text fields.
pub fn file_field_info(field: &Field<'_>) -> Option<FileFieldInfo> {
    let file_name = field.file_name()?.to_string();
    Some(FileFieldInfo {
        field_name: field.name().unwrap_or_default().to_string(),
        file_name,
        content_type: field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string(),
    })
}

/// Turn a multipart field into a byte reader that fails once more than
/// `max_bytes` have been produced.
pub fn field_reader<'a>(field: Field<'a>, max_bytes: usize) -> UploadReader<'a> {
    let mut seen: usize = 0;
    let stream = field.map_err(io::Error::other).and_then(move |chunk| {
        seen = seen.saturating_add(chunk.len());
        let result = if seen > max_bytes {
            Err(io::Error::other(FileSizeExceeded { max_bytes }))
        } else {
            Ok(chunk)
        };
        future::ready(result)
    });
    Box::pin(StreamReader::new(stream))
}

/// Map a multipart decoding failure to the request error it represents
pub fn multipart_error(err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Map a failure while reading the upload body to the request error it represents
pub fn body_read_error(err: io::Error) -> AppError {
    if let Some(inner) = err.get_ref() {
        if let Some(exceeded) = inner.downcast_ref::<FileSizeExceeded>() {
            return AppError::PayloadTooLarge(exceeded.to_string());
        }
        if let Some(multipart) = inner.downcast_ref::<MultipartError>() {
            return multipart_error(multipart);
        }
    }
    AppError::BadRequest(format!("Failed to read file data: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_exceeded_is_payload_too_large() {
        let err = io::Error::other(FileSizeExceeded { max_bytes: 10 });
        let app = body_read_error(err);
        assert!(matches!(app, AppError::PayloadTooLarge(_)));
        assert!(app.to_string().contains("10 bytes"));
    }

    #[test]
    fn test_other_read_errors_are_bad_requests() {
        let err = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        let app = body_read_error(err);
        assert!(matches!(app, AppError::BadRequest(ref msg) if msg.contains("reset by peer")));
    }
}
