//! BART API response DTOs.
//!
//! These types map directly to the JSON flavour of the BART legacy API
//! (`json=y`). Values normally arrive as strings, but per-entry fields are
//! read leniently: a number is kept as its text, and `null`, a missing
//! field or any other shape becomes empty. Deciding what an empty value
//! means is left to the converters, so one odd entry never fails the
//! whole response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope of every BART response.
#[derive(Debug, Clone, Deserialize)]
pub struct BartResponse<R> {
    pub root: R,
}

/// `message` is `""` on success and an object when something went wrong.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageField {
    Detail(MessageDetail),
    Text(String),
    Other(Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDetail {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub details: Option<String>,
}

/// Reported for an embedded error object that carries no text at all.
pub const UNSPECIFIED_API_ERROR: &str = "unspecified error";

impl ApiErrorDetail {
    /// `text`, else `details`, else a fixed placeholder.
    pub fn message(&self) -> &str {
        let details = self.details.as_deref().map(str::trim).unwrap_or_default();
        match self.text.trim() {
            "" if details.is_empty() => UNSPECIFIED_API_ERROR,
            "" => details,
            text => text,
        }
    }
}

impl MessageField {
    /// The embedded API error text, if the message carries one.
    pub fn error_text(&self) -> Option<&str> {
        match self {
            MessageField::Detail(MessageDetail {
                error: Some(error), ..
            }) => Some(error.message()),
            _ => None,
        }
    }
}

/// String field that tolerates numbers, `null` and other shapes.
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Like `lenient_opt_string`, with anything unusable read as `""`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

/// A response root that may carry an embedded `message`.
pub trait BartRoot {
    fn message(&self) -> Option<&MessageField>;

    /// The embedded API error text, if any.
    fn error_text(&self) -> Option<&str> {
        self.message().and_then(MessageField::error_text)
    }
}

/// Root of an `etd.aspx?cmd=etd` response.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdRoot {
    #[serde(default)]
    pub station: Vec<EtdStation>,
    pub message: Option<MessageField>,
}

impl BartRoot for EtdRoot {
    fn message(&self) -> Option<&MessageField> {
        self.message.as_ref()
    }
}

/// Departures at one station.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdStation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub abbr: String,
    /// Absent when nothing is scheduled (e.g. overnight).
    pub etd: Option<Vec<Etd>>,
}

/// Estimates for one destination.
#[derive(Debug, Clone, Deserialize)]
pub struct Etd {
    #[serde(default, deserialize_with = "lenient_string")]
    pub destination: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub estimate: Vec<Estimate>,
}

/// One estimated departure as the feed sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct Estimate {
    /// Minutes until departure, or "Leaving".
    #[serde(default, deserialize_with = "lenient_string")]
    pub minutes: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub platform: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub direction: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub hexcolor: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub delay: Option<String>,
}

/// Root of a `stn.aspx?cmd=stns` response.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsRoot {
    pub stations: Option<StationList>,
    pub message: Option<MessageField>,
}

impl BartRoot for StationsRoot {
    fn message(&self) -> Option<&MessageField> {
        self.message.as_ref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationList {
    pub station: Vec<StationDto>,
}

/// Minimal DTO for a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub abbr: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gtfs_latitude: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gtfs_longitude: String,
}

/// A single estimate paired with the destination of its ETD group.
///
/// Untrusted: every field is still the feed's raw string. Exists only
/// between the feed client and the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEstimate {
    pub destination: String,
    pub minutes: String,
    pub platform: String,
    pub direction: String,
    pub color: String,
    pub hexcolor: Option<String>,
    pub delay: Option<String>,
}

impl RawEstimate {
    pub fn new(destination: &str, estimate: Estimate) -> Self {
        Self {
            destination: destination.to_string(),
            minutes: estimate.minutes,
            platform: estimate.platform,
            direction: estimate.direction,
            color: estimate.color,
            hexcolor: estimate.hexcolor,
            delay: estimate.delay,
        }
    }
}
