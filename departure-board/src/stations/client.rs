//! BART station catalog client.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use crate::bart::decode;
use crate::bart::types::{StationDto, StationsRoot};
use crate::config::BartConfig;
use crate::domain::{Coordinate, StationId, StationInfo};
use crate::error::SnapshotError;
use crate::transport::HttpTransport;

use super::StationSource;

/// Client for the BART `stn` endpoint.
#[derive(Debug, Clone)]
pub struct StationCatalog<T> {
    transport: T,
    config: BartConfig,
}

impl<T: HttpTransport> StationCatalog<T> {
    pub fn new(transport: T, config: BartConfig) -> Self {
        Self { transport, config }
    }

    /// Fetch the full station list.
    ///
    /// Entries with an unusable id or coordinate are dropped; only an empty
    /// result is an error.
    pub async fn fetch_all(&self) -> Result<Vec<StationInfo>, SnapshotError> {
        let url = self.config.stations_url();

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|e| SnapshotError::CatalogUnavailable(e.to_string()))?;

        if !response.is_success() {
            return Err(SnapshotError::CatalogUnavailable(format!(
                "HTTP {}: {}",
                response.status,
                response.body_excerpt()
            )));
        }

        let root: StationsRoot = decode(&response).map_err(|e| match e {
            SnapshotError::Api(text) => SnapshotError::CatalogUnavailable(text),
            other => SnapshotError::CatalogUnavailable(other.to_string()),
        })?;

        let dtos = root
            .stations
            .map(|list| list.station)
            .ok_or_else(|| SnapshotError::CatalogUnavailable("missing station list".into()))?;

        let stations = build_list(dtos);
        if stations.is_empty() {
            return Err(SnapshotError::EmptyCatalog);
        }

        debug!(count = stations.len(), "fetched station catalog");
        Ok(stations)
    }
}

impl<T: HttpTransport> StationSource for StationCatalog<T> {
    fn stations(&self) -> BoxFuture<'_, Result<Arc<Vec<StationInfo>>, SnapshotError>> {
        Box::pin(async move { self.fetch_all().await.map(Arc::new) })
    }
}

/// Convert catalog DTOs, keeping catalog order and skipping bad rows.
fn build_list(dtos: Vec<StationDto>) -> Vec<StationInfo> {
    dtos.into_iter()
        .filter_map(|dto| match convert(&dto) {
            Some(station) => Some(station),
            None => {
                debug!(abbr = %dto.abbr, name = %dto.name, "skipping unusable catalog entry");
                None
            }
        })
        .collect()
}

fn convert(dto: &StationDto) -> Option<StationInfo> {
    let id = StationId::parse_normalized(&dto.abbr).ok()?;
    let latitude = parse_finite(&dto.gtfs_latitude)?;
    let longitude = parse_finite(&dto.gtfs_longitude)?;

    Some(StationInfo::new(
        id,
        dto.name.clone(),
        Coordinate::new(latitude, longitude),
    ))
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
