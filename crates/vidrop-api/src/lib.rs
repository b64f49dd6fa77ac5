//! Vidrop API Library
//!
//! This crate provides the HTTP upload handler, middleware, and application setup.

pub mod constants;
pub mod error;
mod handlers;
mod middleware;
pub mod setup;
pub mod state;
mod telemetry;
mod utils;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
