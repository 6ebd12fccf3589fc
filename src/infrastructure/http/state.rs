//! Application State

use crate::application::ContentCaches;

/// 应用状态
pub struct AppState {
    pub caches: ContentCaches,
}

impl AppState {
    pub fn new(caches: ContentCaches) -> Self {
        Self { caches }
    }
}
