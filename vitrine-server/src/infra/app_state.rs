use std::fmt;
use std::sync::Arc;

use vitrine_core::GalleryService;

use crate::infra::config::Config;

/// Shared handler state: the gallery service plus the loaded config.
#[derive(Clone)]
pub struct AppState {
    pub gallery: Arc<GalleryService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(gallery: GalleryService, config: Config) -> Self {
        Self {
            gallery: Arc::new(gallery),
            config: Arc::new(config),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
