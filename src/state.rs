use crate::assets::AssetStore;
use crate::cache::PermitCache;
use crate::config::ServiceConfig;
use crate::sources::{HttpFetcher, RecordFetcher, SourceAggregator};
use std::sync::Arc;

/// Shared application state
///
/// Holds the loaded configuration, the record cache over the source
/// aggregator, and the template asset store. Wrapped in an `Arc` and
/// cloned into every handler by axum.
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub cache: PermitCache,
    pub assets: AssetStore,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_fetcher(config, Arc::new(HttpFetcher::new()))
    }

    /// Build state with a custom fetcher; tests substitute a fake here.
    pub fn with_fetcher(config: ServiceConfig, fetcher: Arc<dyn RecordFetcher>) -> Self {
        let aggregator = SourceAggregator::new(config.source_endpoints(), fetcher);
        let cache = PermitCache::new(aggregator, config.cache_ttl());
        let assets = AssetStore::new(config.assets_dir.clone());
        Self {
            config: Arc::new(config),
            cache,
            assets,
        }
    }
}
