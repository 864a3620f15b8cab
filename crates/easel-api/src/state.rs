use std::sync::Arc;

use easel_gateway::ImageGenerator;
use easel_store::{HistoryStore, ImageStore};

use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// All resources are wrapped in Arc for efficient sharing across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub history: Arc<HistoryStore>,
    pub images: Arc<ImageStore>,
    pub generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    pub fn new(
        config: Config,
        history: HistoryStore,
        images: ImageStore,
        generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            history: Arc::new(history),
            images: Arc::new(images),
            generator,
        }
    }
}
