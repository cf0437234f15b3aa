use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::duration::{TimerDuration, TryNewTimerDurationError};

/// An abstract interface for accessing duration preferences.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DurationRepository: Send + Sync + 'static {
    /// Get the duration selected when the app launches, if any.
    ///
    /// # Errors
    ///
    /// This function will return an error if the stored preference is not a
    /// selectable duration or could not be loaded.
    async fn initial_selection(&self) -> Result<Option<TimerDuration>, GetDurationError>;
}

/// An error type of accessing the repository of [`TimerDuration`]s.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum GetDurationError {
    #[snafu(display("Could not create an invalid duration"))]
    #[non_exhaustive]
    Invalid { source: TryNewTimerDurationError },
    #[snafu(whatever, display("Load duration failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}
