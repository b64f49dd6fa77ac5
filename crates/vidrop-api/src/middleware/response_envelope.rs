//! Rewrites bare 413 responses into the JSON error envelope.
//!
//! `RequestBodyLimitLayer` rejects requests whose declared Content-Length is
//! over the limit before any handler runs, with a plain-text body.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use vidrop_core::AppError;

use crate::error::HttpAppError;

pub async fn payload_too_large_envelope(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    HttpAppError(AppError::PayloadTooLarge(
        "Request body exceeds the configured limit".to_string(),
    ))
    .into_response()
}
