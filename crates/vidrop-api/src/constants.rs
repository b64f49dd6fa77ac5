//! API route paths and multipart field names

/// Video upload endpoint
pub const UPLOAD_PATH: &str = "/api/upload";

/// Liveness check
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the uploaded video
pub const VIDEO_FIELD: &str = "video";

/// Allowance for multipart framing (boundaries, part headers, text fields)
/// on top of the maximum video size when limiting the request body.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
