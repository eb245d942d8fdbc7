use cinder::service::CacheAccessService;
use std::sync::Arc;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache_access: Arc<CacheAccessService>,
}

impl AppState {
    pub fn new(cache_access: Arc<CacheAccessService>) -> Self {
        Self { cache_access }
    }
}
