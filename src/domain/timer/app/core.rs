use std::sync::Arc;

use snafu::prelude::*;

use crate::domain::repository::{DurationRepository, NotificationRepository, SnapshotStore};
use crate::domain::timer::app::service::{
    PauseService, QueryService, ReconcileService, SelectService, SnapshotService, StartService,
    StopService, SubscribeService,
};
use crate::domain::timer::inbound::{
    PausePort, QueryPort, ReconcilePort, SelectPort, SnapshotPort, StartPort, StopPort,
    SubscribePort,
};
use crate::domain::timer::outbound::{Clock, NotificationScheduler, TimerObserver};
use crate::domain::timer::worker::{self, SpawnWorkerError, WorkerPorts};

/// Everything the engine needs from the outside world.
pub struct TimerDependencies {
    pub scheduler: Arc<dyn NotificationScheduler>,
    pub store: Arc<dyn SnapshotStore>,
    pub clock: Arc<dyn Clock>,
    pub duration_repository: Arc<dyn DurationRepository>,
    pub notification_repository: Arc<dyn NotificationRepository>,
    pub observers: Vec<Arc<dyn TimerObserver>>,
    /// Key of the shared slot the remaining seconds are written to.
    pub snapshot_key: String,
}

/// Entrance to the domain logic, providing ports for external adapters.
pub struct ApplicationCore {
    pub select: Arc<dyn SelectPort>,
    pub start: Arc<dyn StartPort>,
    pub pause: Arc<dyn PausePort>,
    pub stop: Arc<dyn StopPort>,
    pub snapshot: Arc<dyn SnapshotPort>,
    pub reconcile: Arc<dyn ReconcilePort>,
    pub query: Arc<dyn QueryPort>,
    pub subscribe: Arc<dyn SubscribePort>,
}

impl ApplicationCore {
    /// Initialize the application by injecting external repositories and
    /// adapters. The engine runs on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// This function will return an error if initialization failed.
    pub async fn setup(
        dependencies: TimerDependencies,
    ) -> Result<ApplicationCore, SetupApplicationCoreError> {
        let TimerDependencies {
            scheduler,
            store,
            clock,
            duration_repository,
            notification_repository,
            observers,
            snapshot_key,
        } = dependencies;

        let ports = WorkerPorts {
            store,
            scheduler,
            clock,
            observers,
        };
        let worker = worker::spawn(
            duration_repository,
            notification_repository,
            snapshot_key,
            ports,
        )
        .await
        .context(WorkerSnafu)?;
        let worker = Arc::new(worker);

        let app = ApplicationCore {
            select: Arc::new(SelectService::new(Arc::clone(&worker))),
            start: Arc::new(StartService::new(Arc::clone(&worker))),
            pause: Arc::new(PauseService::new(Arc::clone(&worker))),
            stop: Arc::new(StopService::new(Arc::clone(&worker))),
            snapshot: Arc::new(SnapshotService::new(Arc::clone(&worker))),
            reconcile: Arc::new(ReconcileService::new(Arc::clone(&worker))),
            query: Arc::new(QueryService::new(Arc::clone(&worker))),
            subscribe: Arc::new(SubscribeService::new(worker)),
        };

        Ok(app)
    }
}

/// An error for initializing the application.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SetupApplicationCoreError {
    #[snafu(display("Could not spawn a background worker"))]
    Worker { source: SpawnWorkerError },
}
