//! Nearest-station snapshot service.
//!
//! Given the user's position: load the station catalog, pick the closest
//! station, fetch its departures under a deadline, and assemble an
//! immutable `StationSnapshot`. Each call is independent; retrying is up
//! to the caller.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::bart::FeedClient;
use crate::board::build_board;
use crate::config::ServiceConfig;
use crate::domain::{Coordinate, StationInfo, StationSnapshot, nearest, ranked};
use crate::error::SnapshotError;
use crate::location::LocationProvider;
use crate::stations::StationSource;
use crate::transport::HttpTransport;

/// How many runner-up stations to log at debug level.
const LOGGED_CANDIDATES: usize = 5;

/// Builds snapshots of the station nearest to a position.
#[derive(Debug, Clone)]
pub struct NearestStationService<S, T> {
    stations: S,
    feed: FeedClient<T>,
    config: ServiceConfig,
}

impl<S: StationSource, T: HttpTransport> NearestStationService<S, T> {
    pub fn new(stations: S, feed: FeedClient<T>, config: ServiceConfig) -> Self {
        Self {
            stations,
            feed,
            config,
        }
    }

    /// Snapshot of the station nearest to `coordinate`.
    pub async fn nearest_snapshot(
        &self,
        coordinate: Coordinate,
    ) -> Result<StationSnapshot, SnapshotError> {
        let stations = self.stations.stations().await?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            for (rank, (station, distance)) in ranked(coordinate, &stations)
                .into_iter()
                .take(LOGGED_CANDIDATES)
                .enumerate()
            {
                debug!(rank = rank + 1, station = %station.id, name = %station.name, distance_miles = distance, "candidate station");
            }
        }

        let (station, distance) = nearest(coordinate, &stations)?;
        info!(station = %station.id, name = %station.name, distance_miles = distance, "selected nearest station");

        self.snapshot_for_station(station, distance).await
    }

    /// Snapshot for whatever position `location` currently reports.
    ///
    /// Fails with `LocationUnavailable`, before any network call, when the
    /// provider has no position.
    pub async fn snapshot_for_location(
        &self,
        location: &dyn LocationProvider,
    ) -> Result<StationSnapshot, SnapshotError> {
        let coordinate = location
            .current_coordinate()
            .ok_or(SnapshotError::LocationUnavailable)?;
        self.nearest_snapshot(coordinate).await
    }

    /// The current station catalog.
    pub async fn stations(&self) -> Result<Arc<Vec<StationInfo>>, SnapshotError> {
        self.stations.stations().await
    }

    async fn snapshot_for_station(
        &self,
        station: StationInfo,
        distance: f64,
    ) -> Result<StationSnapshot, SnapshotError> {
        let estimates = self
            .feed
            .fetch_estimates(&station.id, self.config.feed_timeout)
            .await?;

        let now = Utc::now();
        let board = build_board(&estimates, now);

        Ok(StationSnapshot::new(
            station,
            distance,
            now,
            board.warning,
            board.platforms,
        ))
    }
}
