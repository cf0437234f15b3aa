use std::sync::Arc;

use crate::config::Configuration;
use crate::domain::entity::TimerDuration;
use crate::domain::repository::{duration::GetDurationError, DurationRepository};

/// A [`DurationRepository`] implementation which reads configuration files.
pub struct DurationConfiguration {
    config: Arc<Configuration>,
}

impl DurationConfiguration {
    /// Creates a new [`DurationConfiguration`].
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl DurationRepository for DurationConfiguration {
    async fn initial_selection(&self) -> Result<Option<TimerDuration>, GetDurationError> {
        self.config
            .timer
            .selected
            .map(TimerDuration::try_new)
            .transpose()
            .map_err(|err| GetDurationError::Invalid { source: err })
    }
}
