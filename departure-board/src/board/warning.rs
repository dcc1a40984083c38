//! Service-warning summary.

use crate::domain::{ServiceWarning, TrainRecord};

/// Title of the warning raised for delays.
pub const DELAY_WARNING_TITLE: &str = "Service Delays";

/// Most delay messages shown in one warning.
pub const MAX_WARNING_MESSAGES: usize = 3;

/// Summarize delayed trains, or `None` when nothing is delayed.
///
/// Each delayed record contributes `"<destination>: <n> min delay"`.
/// Identical messages are collapsed and at most the first three, in feed
/// order, are kept.
pub fn derive(records: &[TrainRecord]) -> Option<ServiceWarning> {
    let mut messages: Vec<String> = Vec::new();

    for record in records {
        let Some(delay) = record.delay_minutes.filter(|d| *d > 0) else {
            continue;
        };
        let message = format!("{}: {} min delay", record.destination, delay);
        if !messages.contains(&message) {
            messages.push(message);
        }
        if messages.len() == MAX_WARNING_MESSAGES {
            break;
        }
    }

    if messages.is_empty() {
        return None;
    }

    Some(ServiceWarning {
        active: true,
        title: DELAY_WARNING_TITLE.to_string(),
        description: messages.join(". "),
    })
}
