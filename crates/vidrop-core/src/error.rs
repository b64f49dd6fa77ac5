//! Error types module
//!
//! All request failures are unified under [`AppError`]. Each variant describes
//! how it is presented over HTTP through [`ErrorMetadata`]; the API crate only
//! wraps it to render the JSON error envelope.

use crate::validation::ValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for client mistakes worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No video file uploaded")]
    MissingFile,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Persistence(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::MissingFile => (400, "MISSING_FILE", LogLevel::Debug),
        AppError::Validation(_) => (500, "VALIDATION_ERROR", LogLevel::Warn),
        AppError::Persistence(_) => (500, "STORAGE_ERROR", LogLevel::Error),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Debug),
        AppError::BadRequest(_) => (400, "BAD_REQUEST", LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Variant name, used as a structured logging field
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingFile => "MissingFile",
            AppError::Validation(_) => "Validation",
            AppError::Persistence(_) => "Persistence",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingFile => self.to_string(),
            AppError::Validation(err) => err.to_string(),
            AppError::Persistence(msg) => msg.clone(),
            AppError::PayloadTooLarge(_) => "File too large".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_missing_file() {
        let err = AppError::MissingFile;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "MISSING_FILE");
        assert_eq!(err.client_message(), "No video file uploaded");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::from(ValidationError::NotAVideo {
            filename: "a.txt".to_string(),
            mime_type: "text/plain".to_string(),
        });
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.client_message(), "Only video files are allowed!");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_persistence_keeps_underlying_text() {
        let err = AppError::Persistence("Invalid Signature".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert_eq!(err.client_message(), "Invalid Signature");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_payload_too_large() {
        let err = AppError::PayloadTooLarge("limit 100 MB".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.client_message(), "File too large");
    }

    #[test]
    fn test_internal_errors_are_hidden() {
        let err = AppError::Internal("CLOUDINARY_API_KEY not configured".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.to_string().contains("CLOUDINARY_API_KEY"));
        assert_eq!(err.error_type(), "Internal");
    }
}
