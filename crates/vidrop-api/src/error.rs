//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//! Handlers return `Result<impl IntoResponse, HttpAppError>` so every failure
//! renders the same `{"status":"error","message":..}` envelope.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use vidrop_core::models::ResponseStatus;
use vidrop_core::{AppError, ErrorMetadata, LogLevel, ValidationError};
use vidrop_storage::StorageError;

use crate::utils::upload::{body_read_error, multipart_error};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from vidrop-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(AppError::Validation(err))
    }
}

/// A request that is not `multipart/form-data` (or has no boundary) cannot carry
/// the video field, so it is reported as a missing file.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        let app = match rejection {
            MultipartRejection::InvalidBoundary(_) => AppError::MissingFile,
            other => AppError::BadRequest(other.body_text()),
        };
        HttpAppError(app)
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError(multipart_error(&err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse::new(app_error.client_message(), app_error.error_code());

        (status, Json(body)).into_response()
    }
}

// Convert storage errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::BodyRead(err) => body_read_error(err),
            StorageError::UploadFailed(msg) => AppError::Persistence(msg),
            StorageError::Remote(msg) => AppError::Persistence(msg),
            StorageError::BackendError(msg) => AppError::Persistence(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}
