//! Conversion from raw estimates to train records.
//!
//! Nothing here can fail. A malformed sub-field degrades to a safe default
//! so that one bad estimate never costs the station its whole board.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::bart::RawEstimate;
use crate::domain::{TrainRecord, TrainStatus};

use super::colors::resolve_color;

/// Largest delay we believe, in minutes.
///
/// The feed occasionally reports delays of hundreds of minutes. Those are
/// clamped rather than dropped so the train still shows as delayed.
pub const MAX_PLAUSIBLE_DELAY_MINS: u32 = 60;

/// Line label when the feed gives no color name.
pub const FALLBACK_LINE: &str = "BART";

/// Build a `TrainRecord` from one raw estimate.
pub fn normalize(raw: &RawEstimate, now: DateTime<Utc>) -> TrainRecord {
    let minutes = parse_minutes(&raw.minutes);
    let delay_minutes = parse_delay(raw.delay.as_deref());

    let reported = raw.delay.as_deref().and_then(|d| d.trim().parse::<i64>().ok());
    if let (Some(reported), Some(capped)) = (reported, delay_minutes)
        && reported > i64::from(capped)
    {
        warn!(destination = %raw.destination, reported, capped, "implausible delay capped");
    }

    let line = if raw.color.trim().is_empty() {
        FALLBACK_LINE.to_string()
    } else {
        raw.color.clone()
    };

    TrainRecord {
        id: Uuid::new_v4(),
        line,
        destination: raw.destination.clone(),
        minutes_until_arrival: minutes,
        arrival_time: arrival_time(now, minutes),
        status: TrainStatus::classify(minutes, delay_minutes),
        color_hex: resolve_color(raw.hexcolor.as_deref(), &raw.color),
        delay_minutes,
    }
}

/// Minutes until departure; `"Leaving"` and anything else non-numeric is 0.
pub fn parse_minutes(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

/// Apply the delay policy to the feed's `delay` field.
///
/// Positive values are capped at `MAX_PLAUSIBLE_DELAY_MINS`. Absent, zero,
/// negative and unparsable values mean "no delay".
pub fn parse_delay(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s == "0" {
        return None;
    }

    let delay: i64 = s.parse().ok()?;
    if delay <= 0 {
        return None;
    }

    Some(delay.min(i64::from(MAX_PLAUSIBLE_DELAY_MINS)) as u32)
}

fn arrival_time(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(now)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn raw(minutes: String, delay: Option<String>) -> RawEstimate {
        RawEstimate {
            destination: "Antioch".into(),
            minutes,
            platform: "2".into(),
            direction: "North".into(),
            color: "YELLOW".into(),
            hexcolor: None,
            delay,
        }
    }

    proptest! {
        #[test]
        fn delay_above_cap_is_cap(d in 61i64..1_000_000) {
            prop_assert_eq!(parse_delay(Some(&d.to_string())), Some(MAX_PLAUSIBLE_DELAY_MINS));
        }

        #[test]
        fn delay_within_cap_is_kept(d in 1i64..=60) {
            prop_assert_eq!(parse_delay(Some(&d.to_string())), Some(d as u32));
        }

        #[test]
        fn unparsable_delay_is_absent(s in "[a-zA-Z ]{1,10}") {
            prop_assert_eq!(parse_delay(Some(&s)), None);
        }

        /// Delayed iff a positive delay; cancelled iff negative minutes and
        /// no delay; otherwise on time.
        #[test]
        fn status_invariant(
            minutes in prop_oneof![
                (-30i64..120).prop_map(|m| m.to_string()),
                Just("Leaving".to_string()),
                "[a-z]{0,5}",
            ],
            delay in proptest::option::of(prop_oneof![
                (-10i64..500).prop_map(|d| d.to_string()),
                "[a-z]{0,5}",
            ]),
        ) {
            let record = normalize(&raw(minutes, delay), Utc::now());
            let delayed = record.delay_minutes.is_some_and(|d| d > 0);

            prop_assert_eq!(record.status == TrainStatus::Delayed, delayed);
            prop_assert_eq!(
                record.status == TrainStatus::Cancelled,
                record.minutes_until_arrival < 0 && record.delay_minutes.is_none()
            );
            if let Some(d) = record.delay_minutes {
                prop_assert!((1..=MAX_PLAUSIBLE_DELAY_MINS).contains(&d));
            }
        }
    }
}
