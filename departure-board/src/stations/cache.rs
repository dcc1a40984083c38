//! Time-bounded cache for the station catalog.
//!
//! The catalog changes a few times a year, so fetching it for every
//! snapshot wastes a round trip. The whole list is cached as one entry and
//! replaced wholesale on expiry or refresh. Concurrent misses share a
//! single fetch.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::info;

use crate::domain::StationInfo;
use crate::error::SnapshotError;
use crate::transport::HttpTransport;

use super::{StationCatalog, StationSource};

/// Cached catalog entry.
type CatalogEntry = Arc<Vec<StationInfo>>;

/// Configuration for the catalog cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetched catalog stays valid.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Station catalog with caching.
///
/// Wraps a `StationCatalog` and keeps the last successful list for the
/// configured TTL. Failed fetches are never cached.
pub struct CachedStationCatalog<T> {
    catalog: StationCatalog<T>,
    cache: MokaCache<(), CatalogEntry>,
}

impl<T: HttpTransport> CachedStationCatalog<T> {
    /// Create a new cached catalog.
    pub fn new(catalog: StationCatalog<T>, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .build();

        Self { catalog, cache }
    }

    /// Get the station list, fetching it if the cache is empty or expired.
    pub async fn get(&self) -> Result<CatalogEntry, SnapshotError> {
        self.cache
            .try_get_with((), async {
                let stations = self.catalog.fetch_all().await?;
                info!(count = stations.len(), "loaded station catalog");
                Ok::<_, SnapshotError>(Arc::new(stations))
            })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Fetch a fresh list and replace the cached one.
    ///
    /// On failure the previous list stays in place and the error is
    /// returned.
    pub async fn refresh(&self) -> Result<usize, SnapshotError> {
        let stations = self.catalog.fetch_all().await?;
        let count = stations.len();
        self.cache.insert((), Arc::new(stations)).await;
        Ok(count)
    }

    /// Drop the cached list; the next `get` fetches again.
    #[cfg(test)]
    async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
    }

    /// Whether a list is currently cached.
    #[cfg(test)]
    async fn is_cached(&self) -> bool {
        self.cache.get(&()).await.is_some()
    }
}

impl<T: HttpTransport> StationSource for CachedStationCatalog<T> {
    fn stations(&self) -> BoxFuture<'_, Result<CatalogEntry, SnapshotError>> {
        Box::pin(self.get())
    }
}
