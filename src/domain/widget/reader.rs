use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entity::snapshot::format_clock;
use crate::domain::repository::SnapshotStore;
use crate::domain::timer::outbound::Clock;
use crate::tracing_report;

/// What the widget shows: the remaining seconds last persisted by the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetEntry {
    pub date: DateTime<Utc>,
    pub display_value: u64,
}

impl WidgetEntry {
    /// An entry shown before any data is available.
    pub fn placeholder(date: DateTime<Utc>) -> Self {
        Self {
            date,
            display_value: 0,
        }
    }

    /// The display value formatted as `MM:SS`.
    pub fn display_time(&self) -> String {
        format_clock(self.display_value)
    }
}

/// A read-only view of the shared slot. It never writes, never ticks and
/// never corrects for elapsed time, so the value it shows may be stale.
pub struct WidgetSnapshotReader {
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    key: String,
}

impl WidgetSnapshotReader {
    /// Creates a new [`WidgetSnapshotReader`] reading `key` from `store`.
    pub fn new(store: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>, key: String) -> Self {
        Self { store, clock, key }
    }

    /// Read the shared slot once and build an entry from it. An absent key or
    /// an unavailable store renders as 0.
    pub async fn render(&self) -> WidgetEntry {
        let date = self.clock.now();
        match self.store.get(&self.key).await {
            Ok(Some(display_value)) => WidgetEntry {
                date,
                display_value,
            },
            Ok(None) => WidgetEntry::placeholder(date),
            Err(err) => {
                tracing_report!(warn, err, "Could not read snapshot for widget");
                WidgetEntry::placeholder(date)
            }
        }
    }
}
