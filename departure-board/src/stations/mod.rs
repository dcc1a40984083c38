//! BART station catalog.
//!
//! Provides the list of known stations (id, name, position), fetched from
//! the `stn` endpoint and optionally held in a time-bounded cache. A
//! refresh always replaces the whole list.

mod cache;
mod client;

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::StationInfo;
use crate::error::SnapshotError;

pub use cache::{CacheConfig, CachedStationCatalog};
pub use client::StationCatalog;

/// Anything that can hand out the current station list.
///
/// Fails with `CatalogUnavailable` or `EmptyCatalog`; a successful list is
/// never empty.
pub trait StationSource: Send + Sync {
    fn stations(&self) -> BoxFuture<'_, Result<Arc<Vec<StationInfo>>, SnapshotError>>;
}

impl<S: StationSource + ?Sized> StationSource for Arc<S> {
    fn stations(&self) -> BoxFuture<'_, Result<Arc<Vec<StationInfo>>, SnapshotError>> {
        (**self).stations()
    }
}
