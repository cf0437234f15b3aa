use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;

use crate::domain::entity::{NotificationMessage, RunMode, TimerDuration, TimerSnapshot};
use crate::domain::repository::SnapshotStore;
use crate::domain::timer::outbound::{Clock, NotificationScheduler, TimerEvent, TimerObserver};
use crate::domain::timer::worker::handle::Command;
use crate::domain::timer::worker::state::WorkerState;
use crate::tracing_report;

/// A type that stores configurations required by [`WorkerRoutine`]
/// initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub notification: NotificationMessage,
    pub snapshot_key: String,
    pub initial_selection: Option<TimerDuration>,
}

/// External collaborators the [`WorkerRoutine`] talks to.
pub struct WorkerPorts {
    pub store: Arc<dyn SnapshotStore>,
    pub scheduler: Arc<dyn NotificationScheduler>,
    pub clock: Arc<dyn Clock>,
    pub observers: Vec<Arc<dyn TimerObserver>>,
}

/// A [`WorkerContext`] stores all objects relevant to the [`WorkerRoutine`]
/// and the business logic.
pub struct WorkerContext {
    pub config: WorkerConfig,
    pub selected: Option<TimerDuration>,
    pub commands: Receiver<Command>,
    pub ports: WorkerPorts,
    persisted_at: Option<DateTime<Utc>>,
}

impl WorkerContext {
    /// Creates a new [`WorkerContext`] with the configured initial selection.
    pub fn new(config: WorkerConfig, commands: Receiver<Command>, ports: WorkerPorts) -> Self {
        Self {
            selected: config.initial_selection,
            config,
            commands,
            ports,
            persisted_at: None,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.ports.clock.now()
    }

    pub fn select(&mut self, duration: TimerDuration) {
        tracing::info!(%duration, "Selected duration");
        self.selected = Some(duration);
    }

    /// Write `remaining` into the shared slot. Failures are logged and
    /// otherwise ignored.
    pub async fn persist(&mut self, remaining: u64) {
        match self
            .ports
            .store
            .set(&self.config.snapshot_key, remaining)
            .await
        {
            Ok(()) => {
                self.persisted_at = Some(self.now());
                tracing::debug!(remaining, "Persisted snapshot");
            }
            Err(err) => tracing_report!(warn, err, "Could not persist snapshot"),
        }
    }

    /// Wall-clock time of the last successful write to the shared slot in
    /// this session.
    pub fn persisted_at(&self) -> Option<DateTime<Utc>> {
        self.persisted_at
    }

    /// Read the shared slot. Both an absent key and an unavailable store yield
    /// `None`.
    pub async fn load(&self) -> Option<u64> {
        match self.ports.store.get(&self.config.snapshot_key).await {
            Ok(Some(remaining)) => {
                tracing::debug!(remaining, "Loaded snapshot");
                Some(remaining)
            }
            Ok(None) => {
                tracing::debug!("No snapshot from a previous session");
                None
            }
            Err(err) => {
                tracing_report!(warn, err, "Could not load snapshot");
                None
            }
        }
    }

    /// Replace the pending completion alert with one firing at `fire_at`.
    pub async fn schedule_completion(&self, fire_at: DateTime<Utc>) {
        let notification = &self.config.notification;
        self.ports.scheduler.cancel(notification.identifier()).await;

        match self.ports.scheduler.schedule(notification, fire_at).await {
            Ok(()) => tracing::debug!(%fire_at, "Scheduled completion notification"),
            Err(err) => tracing_report!(error, err, "Could not schedule notification"),
        }
    }

    pub async fn cancel_completion(&self) {
        self.ports
            .scheduler
            .cancel(self.config.notification.identifier())
            .await;
    }

    /// Register `observer` and tell it about the `current` state.
    pub fn subscribe(&mut self, observer: Arc<dyn TimerObserver>, current: TimerSnapshot) {
        observer.notify(&TimerEvent::Changed(current));
        self.ports.observers.push(observer);
    }

    /// Tell every observer about the transition from `before` to `after`.
    pub fn announce(&self, before: &TimerSnapshot, after: &TimerSnapshot) {
        if before == after {
            return;
        }

        self.emit(&TimerEvent::Changed(after.clone()));

        if before.mode != RunMode::Running && after.mode == RunMode::Running {
            self.emit(&TimerEvent::BecameRunning(after.clone()));
        }
    }

    fn emit(&self, event: &TimerEvent) {
        for observer in &self.ports.observers {
            observer.notify(event);
        }
    }
}

/// A type responsible for the engine's main business logic. A
/// [`WorkerRoutine`] runs on background, receiving [`Command`]s from
/// [`WorkerHandle`] and ticks from its own interval.
///
/// [`WorkerHandle`]: crate::domain::timer::worker::WorkerHandle
pub struct WorkerRoutine {
    context: WorkerContext,
    state: WorkerState,
}

impl WorkerRoutine {
    /// Spawn a running [`WorkerRoutine`] on background.
    pub fn spawn(
        config: WorkerConfig,
        commands: Receiver<Command>,
        ports: WorkerPorts,
    ) -> JoinHandle<()> {
        tokio::spawn(async {
            let mut worker = Self {
                context: WorkerContext::new(config, commands, ports),
                state: WorkerState::new(),
            };
            worker.run().await;
        })
    }

    /// Main part of its business logic.
    async fn run(&mut self) {
        while !self.state.is_closed() {
            self.state.run(&mut self.context).await;
        }
        tracing::debug!("Timer worker exited");
    }
}
