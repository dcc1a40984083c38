//! Geographic coordinates and great-circle distance.

use serde::Serialize;

use super::StationInfo;
use crate::error::SnapshotError;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Haversine distance between two coordinates, in miles.
///
/// Non-finite input gives NaN; callers treat that as "no valid distance".
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points. `clamp`
    // keeps NaN, `min` would not.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}

/// Pick the candidate closest to `from`.
///
/// Linear scan with a strict `<`, so the earliest candidate wins a tie.
/// A NaN distance never beats a real one; if every distance is NaN the
/// first candidate is returned with a NaN distance.
pub fn nearest(
    from: Coordinate,
    candidates: &[StationInfo],
) -> Result<(StationInfo, f64), SnapshotError> {
    let (first, rest) = candidates
        .split_first()
        .ok_or(SnapshotError::EmptyCandidateSet)?;

    let mut best = first;
    let mut best_distance = distance_miles(from, first.coordinate);

    for candidate in rest {
        let distance = distance_miles(from, candidate.coordinate);
        if distance < best_distance || (best_distance.is_nan() && !distance.is_nan()) {
            best = candidate;
            best_distance = distance;
        }
    }

    Ok((best.clone(), best_distance))
}

/// All candidates with their distance from `from`, closest first.
///
/// Stations with no valid distance sort last.
pub fn ranked(from: Coordinate, candidates: &[StationInfo]) -> Vec<(&StationInfo, f64)> {
    let mut ranked: Vec<_> = candidates
        .iter()
        .map(|s| (s, distance_miles(from, s.coordinate)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}
