use std::sync::Arc;

use snafu::prelude::*;

use crate::domain::entity::{RunMode, TimerDuration, TimerSnapshot};
use crate::domain::timer::outbound::TimerObserver;

/// A public port for choosing the countdown length.
#[async_trait::async_trait]
pub trait SelectPort: Send + Sync + 'static {
    /// Do the selection. It takes effect the next time the timer starts from
    /// idle.
    async fn select(&self, duration: TimerDuration);
}

/// A public port for starting or resuming the countdown.
#[async_trait::async_trait]
pub trait StartPort: Send + Sync + 'static {
    /// Do the start operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if nothing is selected or the timer
    /// is already running.
    async fn start(&self) -> Result<(), InvalidOperationError>;
}

/// A public port for suspending the countdown.
#[async_trait::async_trait]
pub trait PausePort: Send + Sync + 'static {
    /// Do the pause operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer is not running.
    async fn pause(&self) -> Result<(), InvalidOperationError>;
}

/// A public port for resetting the countdown.
#[async_trait::async_trait]
pub trait StopPort: Send + Sync + 'static {
    /// Do the stop operation.
    async fn stop(&self);
}

/// A public port for exchanging state with the shared slot. Hosts call
/// [`load`] when the view becomes visible and [`persist`] when it is hidden.
///
/// [`load`]: SnapshotPort::load
/// [`persist`]: SnapshotPort::persist
#[async_trait::async_trait]
pub trait SnapshotPort: Send + Sync + 'static {
    async fn load(&self);
    async fn persist(&self);
}

/// A public port for correcting the countdown after the host was suspended.
#[async_trait::async_trait]
pub trait ReconcilePort: Send + Sync + 'static {
    async fn reconcile(&self);
}

/// A public port for querying the current state.
#[async_trait::async_trait]
pub trait QueryPort: Send + Sync + 'static {
    /// Do the query operation.
    async fn query(&self) -> TimerSnapshot;
}

/// A public port for registering a [`TimerObserver`].
#[async_trait::async_trait]
pub trait SubscribePort: Send + Sync + 'static {
    /// Add an observer. It is immediately told about the current state.
    async fn subscribe(&self, observer: Arc<dyn TimerObserver>);
}

/// An operation requested in a mode that does not allow it.
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum InvalidOperationError {
    #[snafu(display("Could not start without a selected duration"))]
    NoDurationSelected,
    #[snafu(display("Timer is already running"))]
    AlreadyRunning,
    #[snafu(display("Could not pause a timer that is {mode}"))]
    NotRunning { mode: RunMode },
}
