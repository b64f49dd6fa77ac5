//! Application state shared by all handlers.

use std::sync::Arc;
use vidrop_core::{Config, VideoValidator};
use vidrop_storage::VideoStorage;

/// Immutable per-process state; handlers extract it as `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn VideoStorage>,
    pub validator: VideoValidator,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn VideoStorage>) -> Self {
        let validator = VideoValidator::new(config.video_allowed_extensions().to_vec());
        Self {
            config,
            storage,
            validator,
        }
    }
}
