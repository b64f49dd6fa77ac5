//! Route configuration and setup

use crate::constants::{HEALTH_PATH, MULTIPART_OVERHEAD_BYTES, UPLOAD_PATH};
use crate::handlers;
use crate::middleware::{payload_too_large_envelope, request_id::get_request_id, request_id_middleware};
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use vidrop_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = get_request_id(request).unwrap_or("-"),
        )
    });

    let body_limit = config
        .max_video_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    tracing::info!(body_limit_bytes = body_limit, "Request body limit configured");

    let app = Router::new()
        .route(UPLOAD_PATH, post(handlers::video_upload::upload_video))
        .route(HEALTH_PATH, get(handlers::health::health_check))
        // The transport limit below replaces axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(axum::middleware::map_response(payload_too_large_envelope))
        .layer(cors)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
