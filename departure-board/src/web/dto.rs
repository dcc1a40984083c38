//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, StationInfo, StationSnapshot};
use crate::location::FixedLocation;

/// Query for the nearest-station snapshot.
#[derive(Debug, Default, Deserialize)]
pub struct NearestQuery {
    /// Latitude in degrees
    pub lat: Option<f64>,

    /// Longitude in degrees
    pub lon: Option<f64>,
}

impl NearestQuery {
    /// The position this request reports, if it reports a usable one.
    ///
    /// Both parts must be present and finite.
    pub fn location(&self) -> FixedLocation {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                FixedLocation::new(Coordinate::new(lat, lon))
            }
            _ => FixedLocation::unknown(),
        }
    }
}

/// Snapshot plus display fields derived from it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    #[serde(flatten)]
    pub snapshot: StationSnapshot,

    /// e.g. "0.4 miles away"
    pub distance_text: String,

    /// Trains across all platforms
    pub train_count: usize,
}

impl From<StationSnapshot> for SnapshotResponse {
    fn from(snapshot: StationSnapshot) -> Self {
        Self {
            distance_text: snapshot.distance_text(),
            train_count: snapshot.train_count(),
            snapshot,
        }
    }
}

/// A station in the catalog listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&StationInfo> for StationResult {
    fn from(station: &StationInfo) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            latitude: station.coordinate.latitude,
            longitude: station.coordinate.longitude,
        }
    }
}

/// Response for the catalog listing.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Stable machine-readable error kind
    pub kind: &'static str,
}
