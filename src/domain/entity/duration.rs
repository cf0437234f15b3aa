use std::fmt::{Display, Formatter, Result as FmtResult};

use snafu::prelude::*;

/// A countdown length the user can pick, represented in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerDuration(u64);

impl TimerDuration {
    /// Every length the picker offers, in ascending order.
    pub const OPTIONS: [u64; 5] = [5, 10, 15, 30, 60];

    /// Try to create a [`TimerDuration`] from a u64 integer.
    ///
    /// # Errors
    ///
    /// This function will return an error if the integer is not one of
    /// [`TimerDuration::OPTIONS`].
    pub fn try_new(seconds: u64) -> Result<Self, TryNewTimerDurationError> {
        ensure!(
            Self::OPTIONS.contains(&seconds),
            NotAnOptionSnafu { seconds }
        );
        Ok(Self(seconds))
    }

    /// Returns all selectable [`TimerDuration`]s.
    pub fn options() -> impl Iterator<Item = TimerDuration> {
        Self::OPTIONS.into_iter().map(Self)
    }

    /// Returns the length in seconds.
    pub fn seconds(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for TimerDuration {
    type Error = TryNewTimerDurationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl Display for TimerDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} s", self.0)
    }
}

/// An error type of creating a [`TimerDuration`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewTimerDurationError {
    #[snafu(display("{seconds} s is not a selectable duration"))]
    #[non_exhaustive]
    NotAnOption { seconds: u64 },
}
