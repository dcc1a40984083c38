//! Real-time departures client.
//!
//! The request is raced against a timer: whichever finishes first decides
//! the outcome, and the other future is dropped. Dropping the request
//! future cancels it, so a slow network call never outlives the caller's
//! deadline.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::BartConfig;
use crate::domain::StationId;
use crate::error::SnapshotError;
use crate::transport::HttpTransport;

use super::decode;
use super::types::{EtdRoot, RawEstimate};

/// Client for the BART `etd` endpoint.
#[derive(Debug, Clone)]
pub struct FeedClient<T> {
    transport: T,
    config: BartConfig,
}

impl<T: HttpTransport> FeedClient<T> {
    pub fn new(transport: T, config: BartConfig) -> Self {
        Self { transport, config }
    }

    /// Fetch the raw departure estimates for one station.
    ///
    /// Fails with `Timeout` if `timeout` elapses first; the in-flight
    /// request is cancelled in that case.
    pub async fn fetch_estimates(
        &self,
        station: &StationId,
        timeout: Duration,
    ) -> Result<Vec<RawEstimate>, SnapshotError> {
        tokio::select! {
            result = self.request(station) => result,
            () = tokio::time::sleep(timeout) => {
                warn!(%station, timeout_ms = timeout.as_millis() as u64, "departures request timed out");
                Err(SnapshotError::Timeout(timeout))
            }
        }
    }

    async fn request(&self, station: &StationId) -> Result<Vec<RawEstimate>, SnapshotError> {
        let url = self.config.departures_url(station);
        debug!(%station, "fetching departures");

        let response = self.transport.get(&url).await?;

        if !response.is_success() {
            return Err(SnapshotError::Transport(format!(
                "HTTP {}: {}",
                response.status,
                response.body_excerpt()
            )));
        }

        let root: EtdRoot = decode(&response)?;

        let etds = root
            .station
            .into_iter()
            .next()
            .and_then(|s| s.etd)
            .filter(|etds| !etds.is_empty())
            .ok_or(SnapshotError::NoData(*station))?;

        let estimates: Vec<RawEstimate> = etds
            .into_iter()
            .flat_map(|etd| {
                let destination = etd.destination;
                etd.estimate
                    .into_iter()
                    .map(move |estimate| RawEstimate::new(&destination, estimate))
            })
            .collect();

        if estimates.is_empty() {
            return Err(SnapshotError::NoData(*station));
        }

        debug!(%station, count = estimates.len(), "received estimates");
        Ok(estimates)
    }
}
