//! Grouping of train records into platforms.

use std::collections::HashMap;

use crate::bart::RawEstimate;
use crate::domain::{PlatformGroup, TrainRecord};

/// Label for estimates without a platform.
pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// Platform and direction of the estimate a record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformKey {
    pub platform: String,
    pub direction: String,
}

impl PlatformKey {
    pub fn new(platform: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            direction: direction.into(),
        }
    }

    /// Display label and grouping key: "Platform 2", or "Unknown".
    pub fn label(&self) -> String {
        let platform = self.platform.trim();
        if platform.is_empty() {
            UNKNOWN_PLATFORM.to_string()
        } else {
            format!("Platform {platform}")
        }
    }
}

impl From<&RawEstimate> for PlatformKey {
    fn from(raw: &RawEstimate) -> Self {
        Self::new(raw.platform.clone(), raw.direction.clone())
    }
}

/// Group records by platform.
///
/// Trains within a platform are ordered by minutes, keeping feed order on
/// ties. Platforms are ordered by label. A platform's direction is the one
/// on the first record seen for it; later values are ignored.
pub fn group(entries: Vec<(PlatformKey, TrainRecord)>) -> Vec<PlatformGroup> {
    let mut groups: Vec<PlatformGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (key, record) in entries {
        let label = key.label();
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            groups.push(PlatformGroup {
                name: label,
                direction: key.direction,
                trains: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].trains.push(record);
    }

    for group in &mut groups {
        // Stable, so equal minutes keep feed order
        group.trains.sort_by_key(|t| t.minutes_until_arrival);
    }
    groups.sort_by(|a, b| a.name.cmp(&b.name));

    groups
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::TrainStatus;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn entry() -> impl Strategy<Value = (PlatformKey, TrainRecord)> {
        ("[1-4]?", "(North|South)", -2i64..40).prop_map(|(platform, direction, minutes)| {
            let record = TrainRecord {
                id: Uuid::new_v4(),
                line: "BLUE".into(),
                destination: "Dublin/Pleasanton".into(),
                minutes_until_arrival: minutes,
                arrival_time: Utc::now(),
                status: TrainStatus::OnTime,
                color_hex: "#0099CC".into(),
                delay_minutes: None,
            };
            (PlatformKey::new(platform, direction), record)
        })
    }

    proptest! {
        /// Re-sorting a group's trains changes nothing.
        #[test]
        fn grouping_is_idempotent(entries in prop::collection::vec(entry(), 0..40)) {
            for g in group(entries) {
                let mut resorted = g.trains.clone();
                resorted.sort_by_key(|t| t.minutes_until_arrival);
                prop_assert_eq!(resorted, g.trains);
            }
        }

        /// Every record lands in exactly one group, and groups are sorted
        /// by name with no duplicates.
        #[test]
        fn partitions_records(entries in prop::collection::vec(entry(), 0..40)) {
            let total = entries.len();
            let groups = group(entries);

            prop_assert_eq!(groups.iter().map(|g| g.trains.len()).sum::<usize>(), total);
            for pair in groups.windows(2) {
                prop_assert!(pair[0].name < pair[1].name);
            }
        }

        /// Grouping twice from the same input gives the same layout.
        #[test]
        fn deterministic(entries in prop::collection::vec(entry(), 0..40)) {
            let a = group(entries.clone());
            let b = group(entries);
            prop_assert_eq!(a, b);
        }
    }
}
