//! The snapshot handed to presentation layers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{StationInfo, TrainRecord};

/// Name of the transit system every snapshot comes from.
pub const SYSTEM_NAME: &str = "BART";

/// Trains boarding at one platform, soonest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformGroup {
    pub name: String,
    pub direction: String,
    pub trains: Vec<TrainRecord>,
}

/// Summary of active delays at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWarning {
    pub active: bool,
    pub title: String,
    pub description: String,
}

/// One resolved picture of a station's near-term departures.
///
/// Built fresh on every fetch and never mutated afterwards; a newer
/// snapshot replaces an older one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSnapshot {
    pub station: StationInfo,
    pub system: &'static str,
    /// `None` when the user's position gave no valid distance.
    pub distance_miles: Option<f64>,
    pub fetched_at: DateTime<Utc>,
    pub warning: Option<ServiceWarning>,
    /// Sorted by platform name.
    pub platforms: Vec<PlatformGroup>,
}

impl StationSnapshot {
    pub fn new(
        station: StationInfo,
        distance_miles: f64,
        fetched_at: DateTime<Utc>,
        warning: Option<ServiceWarning>,
        platforms: Vec<PlatformGroup>,
    ) -> Self {
        Self {
            station,
            system: SYSTEM_NAME,
            distance_miles: distance_miles.is_finite().then_some(distance_miles),
            fetched_at,
            warning,
            platforms,
        }
    }

    /// Human-readable distance, e.g. "0.4 miles away".
    pub fn distance_text(&self) -> String {
        match self.distance_miles {
            Some(d) => format!("{d:.1} miles away"),
            None => "Unknown distance".to_string(),
        }
    }

    /// Total number of trains across all platforms.
    pub fn train_count(&self) -> usize {
        self.platforms.iter().map(|p| p.trains.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, StationId};

    fn powell() -> StationInfo {
        StationInfo::new(
            StationId::parse("POWL").unwrap(),
            "Powell St.",
            Coordinate::new(37.7849, -122.4074),
        )
    }

    #[test]
    fn nan_distance_becomes_none() {
        let snap = StationSnapshot::new(powell(), f64::NAN, Utc::now(), None, vec![]);
        assert_eq!(snap.distance_miles, None);
        assert_eq!(snap.distance_text(), "Unknown distance");
    }

    #[test]
    fn distance_text_one_decimal() {
        let snap = StationSnapshot::new(powell(), 0.4321, Utc::now(), None, vec![]);
        assert_eq!(snap.distance_text(), "0.4 miles away");
        assert_eq!(snap.system, "BART");
    }

    #[test]
    fn serializes_camel_case() {
        let snap = StationSnapshot::new(powell(), 1.0, Utc::now(), None, vec![]);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["station"]["id"], "POWL");
        assert_eq!(json["distanceMiles"], 1.0);
        assert!(json.get("fetchedAt").is_some());
        assert!(json["warning"].is_null());
    }
}
