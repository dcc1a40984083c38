//! A single normalized departure.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Display state of a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrainStatus {
    #[serde(rename = "On time")]
    OnTime,
    Delayed,
    Cancelled,
}

impl TrainStatus {
    /// Classify a departure from its minute count and capped delay.
    ///
    /// A positive delay always means `Delayed`. Without one, a negative
    /// minute count is how the feed marks a cancelled train.
    pub fn classify(minutes_until_arrival: i64, delay_minutes: Option<u32>) -> Self {
        match delay_minutes {
            Some(d) if d > 0 => TrainStatus::Delayed,
            _ if minutes_until_arrival < 0 => TrainStatus::Cancelled,
            _ => TrainStatus::OnTime,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrainStatus::OnTime => "On time",
            TrainStatus::Delayed => "Delayed",
            TrainStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One upcoming train, built from one raw estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRecord {
    /// Generated per record; the feed has no train identity.
    pub id: Uuid,
    pub line: String,
    pub destination: String,
    pub minutes_until_arrival: i64,
    pub arrival_time: DateTime<Utc>,
    pub status: TrainStatus,
    /// Always `#`-prefixed.
    pub color_hex: String,
    /// Capped delay; only ever `Some` with a positive value.
    pub delay_minutes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_delayed() {
        assert_eq!(TrainStatus::classify(5, Some(3)), TrainStatus::Delayed);
        // A delay wins even over a negative minute count
        assert_eq!(TrainStatus::classify(-1, Some(3)), TrainStatus::Delayed);
    }

    #[test]
    fn classify_cancelled() {
        assert_eq!(TrainStatus::classify(-1, None), TrainStatus::Cancelled);
    }

    #[test]
    fn classify_on_time() {
        assert_eq!(TrainStatus::classify(0, None), TrainStatus::OnTime);
        assert_eq!(TrainStatus::classify(12, None), TrainStatus::OnTime);
        assert_eq!(TrainStatus::classify(12, Some(0)), TrainStatus::OnTime);
    }

    #[test]
    fn status_labels() {
        assert_eq!(TrainStatus::OnTime.to_string(), "On time");
        assert_eq!(
            serde_json::to_string(&TrainStatus::OnTime).unwrap(),
            "\"On time\""
        );
        assert_eq!(
            serde_json::to_string(&TrainStatus::Cancelled).unwrap(),
            "\"Cancelled\""
        );
    }
}
