//! Departure-board assembly.
//!
//! Turns the feed's raw estimates into what a snapshot shows:
//! normalized train records grouped by platform, plus a delay warning.

mod colors;
mod group;
mod normalize;
mod warning;

use chrono::{DateTime, Utc};

use crate::bart::RawEstimate;
use crate::domain::{PlatformGroup, ServiceWarning, TrainRecord};

pub use colors::{DEFAULT_COLOR, color_for_name, resolve_color};
pub use group::{PlatformKey, UNKNOWN_PLATFORM, group};
pub use normalize::{FALLBACK_LINE, MAX_PLAUSIBLE_DELAY_MINS, normalize, parse_delay, parse_minutes};
pub use warning::{DELAY_WARNING_TITLE, MAX_WARNING_MESSAGES, derive};

/// Platforms and warning derived from one batch of estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub platforms: Vec<PlatformGroup>,
    pub warning: Option<ServiceWarning>,
}

/// Normalize a batch against a single `now` and derive the board.
pub fn build_board(estimates: &[RawEstimate], now: DateTime<Utc>) -> Board {
    let entries: Vec<(PlatformKey, TrainRecord)> = estimates
        .iter()
        .map(|raw| (PlatformKey::from(raw), normalize(raw, now)))
        .collect();

    let records: Vec<TrainRecord> = entries.iter().map(|(_, record)| record.clone()).collect();
    let warning = derive(&records);

    Board {
        platforms: group(entries),
        warning,
    }
}
