//! HTTP middleware

pub mod request_id;
pub mod response_envelope;

pub use request_id::request_id_middleware;
pub use response_envelope::payload_too_large_envelope;
