use std::error::Error as StdError;

use chrono::{DateTime, Utc};
use snafu::prelude::*;

use crate::domain::entity::{NotificationMessage, TimerSnapshot};

/// A public port for scheduling the completion alert with the platform.
#[async_trait::async_trait]
pub trait NotificationScheduler: Send + Sync + 'static {
    /// Request delivery of `message` at `fire_at`, replacing any pending
    /// request with the same identifier. This method is not intended to be
    /// implemented by adapters directly.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request was refused.
    async fn schedule(
        &self,
        message: &NotificationMessage,
        fire_at: DateTime<Utc>,
    ) -> Result<(), ScheduleNotificationError> {
        let request = ScheduleRequest {
            identifier: message.identifier().to_owned(),
            summary: message.summary().to_owned(),
            body: message.body().map(|body| body.to_owned()),
            fire_at,
        };
        self.schedule_impl(request).await
    }

    /// Actual implementation of the scheduling operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request was refused.
    async fn schedule_impl(&self, request: ScheduleRequest) -> Result<(), ScheduleNotificationError>;

    /// Withdraw the pending request with this identifier. Does nothing if no
    /// request is pending.
    async fn cancel(&self, identifier: &str);
}

/// A structure that stores required data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub identifier: String,
    pub summary: String,
    pub body: Option<String>,
    pub fire_at: DateTime<Utc>,
}

/// An error type of the scheduling operation.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ScheduleNotificationError {
    #[snafu(whatever, display("Could not schedule a notification: {message}"))]
    Failed {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// A public port for reading the wall clock.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Something the engine announces to its observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The state differs from the one previously announced.
    Changed(TimerSnapshot),
    /// The timer has just entered [`Running`]. Hosts use it to refresh the
    /// widget.
    ///
    /// [`Running`]: crate::domain::entity::RunMode::Running
    BecameRunning(TimerSnapshot),
}

/// A public port for receiving [`TimerEvent`]s. Observers are called on the
/// engine's own task and must not block.
pub trait TimerObserver: Send + Sync + 'static {
    fn notify(&self, event: &TimerEvent);
}
