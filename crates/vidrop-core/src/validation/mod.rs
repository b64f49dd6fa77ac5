//! Validation modules

pub mod video;

pub use video::{ValidationError, VideoValidator, DEFAULT_VIDEO_TOKENS};
