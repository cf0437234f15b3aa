mod handle;
mod routine;
mod state;

pub use handle::WorkerHandle;
pub use routine::WorkerPorts;

use std::sync::Arc;

use snafu::prelude::*;

use crate::domain::repository::duration::{DurationRepository, GetDurationError};
use crate::domain::repository::notification::{GetNotificationError, NotificationRepository};

use routine::{WorkerConfig, WorkerRoutine};

/// Load the worker's configuration and spawn it on the current runtime.
///
/// # Errors
///
/// This function will return an error if a repository fails.
pub async fn spawn(
    duration_repository: Arc<dyn DurationRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
    snapshot_key: String,
    ports: WorkerPorts,
) -> Result<WorkerHandle, SpawnWorkerError> {
    let (requester, commands) = tokio::sync::mpsc::channel(1);
    let config = load_config(duration_repository, notification_repository, snapshot_key).await?;
    WorkerRoutine::spawn(config, commands, ports);
    Ok(WorkerHandle::new(requester))
}

async fn load_config(
    duration_repository: Arc<dyn DurationRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
    snapshot_key: String,
) -> Result<WorkerConfig, SpawnWorkerError> {
    let initial_selection = duration_repository
        .initial_selection()
        .await
        .context(DurationConfigSnafu)?;
    let notification = notification_repository
        .completion_notification()
        .await
        .context(NotificationConfigSnafu)?;

    Ok(WorkerConfig {
        notification,
        snapshot_key,
        initial_selection,
    })
}

/// An error for spawning the background worker.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SpawnWorkerError {
    #[snafu(display("Could not load the initial selection from repository"))]
    DurationConfig { source: GetDurationError },
    #[snafu(display("Could not load the completion notification from repository"))]
    NotificationConfig { source: GetNotificationError },
}
