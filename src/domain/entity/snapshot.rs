use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entity::{RunMode, TimerDuration};

/// An immutable copy of the timer's state, handed to observers and queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub remaining: u64,
    #[serde(serialize_with = "serialize_selected")]
    pub selected: Option<TimerDuration>,
    pub mode: RunMode,
    pub started_at: Option<DateTime<Utc>>,
    pub scheduled_completion_at: Option<DateTime<Utc>>,
}

impl TimerSnapshot {
    /// Remaining time formatted as `MM:SS`.
    pub fn display_time(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn serialize_selected<S>(selected: &Option<TimerDuration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match selected {
        Some(duration) => serializer.serialize_some(&duration.seconds()),
        None => serializer.serialize_none(),
    }
}
