use chrono::{DateTime, Utc};

use crate::domain::timer::outbound::Clock;

/// A [`Clock`] reading the system's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
