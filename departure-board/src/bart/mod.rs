//! BART legacy API client.
//!
//! Wraps the two endpoints we use: the station catalog
//! (`stn.aspx?cmd=stns`) and real-time departures (`etd.aspx?cmd=etd`).
//!
//! Key characteristics of the API:
//! - Every value is a string, including minute counts and coordinates
//! - Minutes may be `"Leaving"` for a train at the platform
//! - Failures can arrive as HTTP 200 with an embedded
//!   `root.message.error` object

mod client;
pub mod types;

pub use client::FeedClient;
pub use types::RawEstimate;

use crate::error::SnapshotError;
use crate::transport::HttpResponse;

/// Decode a BART response body, surfacing the embedded error object
/// before looking at the payload.
pub(crate) fn decode<R>(response: &HttpResponse) -> Result<R, SnapshotError>
where
    R: types::BartRoot + serde::de::DeserializeOwned,
{
    let parsed: types::BartResponse<R> = serde_json::from_slice(&response.body)
        .map_err(|e| SnapshotError::MalformedPayload(e.to_string()))?;

    if let Some(text) = parsed.root.error_text() {
        return Err(SnapshotError::Api(text.to_string()));
    }

    Ok(parsed.root)
}
