//! Application state for the web layer.

use std::sync::Arc;

use crate::bart::FeedClient;
use crate::config::ServiceConfig;
use crate::service::NearestStationService;
use crate::stations::CachedStationCatalog;
use crate::transport::SharedTransport;

/// Station catalog shared between the service and the refresh task.
pub type SharedCatalog = Arc<CachedStationCatalog<SharedTransport>>;

/// The snapshot service as wired for the server.
pub type LiveService = NearestStationService<SharedCatalog, SharedTransport>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Nearest-station snapshot service
    pub service: Arc<LiveService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: SharedCatalog,
        feed: FeedClient<SharedTransport>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            service: Arc::new(NearestStationService::new(catalog, feed, config)),
        }
    }
}
