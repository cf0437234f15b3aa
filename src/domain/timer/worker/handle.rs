use std::sync::Arc;

use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as OneshotSender};

use crate::domain::entity::{TimerDuration, TimerSnapshot};
use crate::domain::timer::inbound::InvalidOperationError;
use crate::domain::timer::outbound::TimerObserver;

/// Actions that a [`WorkerRoutine`] runs.
///
/// [`WorkerRoutine`]: crate::domain::timer::worker::routine::WorkerRoutine
pub enum Command {
    Select {
        duration: TimerDuration,
    },
    Start {
        responder: OneshotSender<Result<(), InvalidOperationError>>,
    },
    Pause {
        responder: OneshotSender<Result<(), InvalidOperationError>>,
    },
    Stop,
    Reconcile,
    Load {
        responder: OneshotSender<()>,
    },
    Persist {
        responder: OneshotSender<()>,
    },
    Query {
        responder: OneshotSender<TimerSnapshot>,
    },
    Subscribe {
        observer: Arc<dyn TimerObserver>,
    },
}

/// Handle that controls a [`WorkerRoutine`]. The routine lives as long as a
/// handle does.
///
/// [`WorkerRoutine`]: crate::domain::timer::worker::routine::WorkerRoutine
#[derive(Debug)]
pub struct WorkerHandle {
    requester: Sender<Command>,
}

impl WorkerHandle {
    /// Creates a new [`WorkerHandle`].
    pub fn new(requester: Sender<Command>) -> Self {
        Self { requester }
    }

    /// Send [`Command::Select`] to the background worker.
    pub async fn select(&self, duration: TimerDuration) {
        self.send(Command::Select { duration }).await
    }

    /// Send [`Command::Start`] to the background worker and start or resume
    /// the countdown.
    pub async fn start(&self) -> Result<(), InvalidOperationError> {
        self.request(|responder| Command::Start { responder }).await
    }

    /// Send [`Command::Pause`] to the background worker and pause the
    /// countdown.
    pub async fn pause(&self) -> Result<(), InvalidOperationError> {
        self.request(|responder| Command::Pause { responder }).await
    }

    /// Send [`Command::Stop`] to the background worker and reset the countdown.
    pub async fn stop(&self) {
        self.send(Command::Stop).await
    }

    /// Send [`Command::Reconcile`] to the background worker.
    pub async fn reconcile(&self) {
        self.send(Command::Reconcile).await
    }

    /// Send [`Command::Load`] and wait until the shared slot has been read.
    pub async fn load(&self) {
        self.request(|responder| Command::Load { responder }).await
    }

    /// Send [`Command::Persist`] and wait until the shared slot has been
    /// written.
    pub async fn persist(&self) {
        self.request(|responder| Command::Persist { responder }).await
    }

    /// Send [`Command::Query`] to the background worker to get the current
    /// state.
    pub async fn query(&self) -> TimerSnapshot {
        self.request(|responder| Command::Query { responder }).await
    }

    /// Send [`Command::Subscribe`] to the background worker.
    pub async fn subscribe(&self, observer: Arc<dyn TimerObserver>) {
        self.send(Command::Subscribe { observer }).await
    }

    async fn send(&self, command: Command) {
        match self.requester.send(command).await {
            Ok(_) => {}
            Err(_) => unreachable!("Worker should not be shut down"),
        };
    }

    async fn request<T, F>(&self, command: F) -> T
    where
        F: FnOnce(OneshotSender<T>) -> Command,
    {
        let (responder, receiver) = oneshot::channel();
        self.send(command(responder)).await;
        match receiver.await {
            Ok(res) => res,
            Err(_) => unreachable!("Worker should not be shut down"),
        }
    }
}
