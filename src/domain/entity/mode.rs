use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Whether the countdown is ticking. The three modes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Idle,
    Running,
    Paused,
}

impl RunMode {
    /// Get the [`RunMode`] of a freshly created timer.
    pub fn initial() -> Self {
        Self::Idle
    }
}

impl Display for RunMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Running => f.write_str("Running"),
            Self::Paused => f.write_str("Paused"),
        }
    }
}
