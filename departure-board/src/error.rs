//! Errors surfaced by the snapshot pipeline.
//!
//! Normalization defects never show up here: a bad minute or delay string
//! degrades to a default inside `board::normalize`. Everything else reaches
//! the caller unchanged, and no layer retries.

use std::time::Duration;

use crate::domain::StationId;
use crate::transport::TransportError;

/// Failure while building a `StationSnapshot`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    /// The location provider had no position to offer
    #[error("location unavailable: enable location services to find the nearest station")]
    LocationUnavailable,

    /// The station catalog could not be fetched or was not well-formed
    #[error("station catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// The catalog parsed but contained no usable station
    #[error("station catalog contains no usable stations")]
    EmptyCatalog,

    /// Nearest-station search was given nothing to search
    #[error("no candidate stations to choose from")]
    EmptyCandidateSet,

    /// The departures request did not finish before its deadline
    #[error("departures request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Network or transport failure talking to the feed
    #[error("transport error: {0}")]
    Transport(String),

    /// The feed reported an error of its own
    #[error("BART API error: {0}")]
    Api(String),

    /// The response body did not have the expected shape
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The feed answered but had no departures for the station
    #[error("no departure data for station {0}")]
    NoData(StationId),
}

impl SnapshotError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SnapshotError::LocationUnavailable => "location_unavailable",
            SnapshotError::CatalogUnavailable(_) => "catalog_unavailable",
            SnapshotError::EmptyCatalog => "empty_catalog",
            SnapshotError::EmptyCandidateSet => "empty_candidate_set",
            SnapshotError::Timeout(_) => "timeout",
            SnapshotError::Transport(_) => "transport_error",
            SnapshotError::Api(_) => "api_error",
            SnapshotError::MalformedPayload(_) => "malformed_payload",
            SnapshotError::NoData(_) => "no_data",
        }
    }
}

impl From<TransportError> for SnapshotError {
    fn from(err: TransportError) -> Self {
        SnapshotError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SnapshotError::Timeout(Duration::from_millis(10_000));
        assert_eq!(err.to_string(), "departures request timed out after 10000ms");

        let err = SnapshotError::Api("Invalid orig".into());
        assert_eq!(err.to_string(), "BART API error: Invalid orig");

        let err = SnapshotError::NoData(StationId::parse("POWL").unwrap());
        assert_eq!(err.to_string(), "no departure data for station POWL");

        let err = SnapshotError::LocationUnavailable;
        assert!(err.to_string().contains("enable location services"));
    }

    #[test]
    fn kinds_are_distinct() {
        use std::collections::HashSet;

        let all = [
            SnapshotError::LocationUnavailable,
            SnapshotError::CatalogUnavailable(String::new()),
            SnapshotError::EmptyCatalog,
            SnapshotError::EmptyCandidateSet,
            SnapshotError::Timeout(Duration::ZERO),
            SnapshotError::Transport(String::new()),
            SnapshotError::Api(String::new()),
            SnapshotError::MalformedPayload(String::new()),
            SnapshotError::NoData(StationId::parse("SANL").unwrap()),
        ];
        let kinds: HashSet<_> = all.iter().map(SnapshotError::kind).collect();
        assert_eq!(kinds.len(), all.len());
    }

    #[test]
    fn transport_error_converts() {
        let err: SnapshotError = TransportError::Request("connection refused".into()).into();
        assert_eq!(err.kind(), "transport_error");
        assert!(err.to_string().contains("connection refused"));
    }
}
