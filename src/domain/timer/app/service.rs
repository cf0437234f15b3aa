use std::sync::Arc;

use crate::domain::entity::{TimerDuration, TimerSnapshot};
use crate::domain::timer::inbound::{
    InvalidOperationError, PausePort, QueryPort, ReconcilePort, SelectPort, SnapshotPort,
    StartPort, StopPort, SubscribePort,
};
use crate::domain::timer::outbound::TimerObserver;
use crate::domain::timer::worker::WorkerHandle;

#[derive(Debug)]
pub struct SelectService {
    worker: Arc<WorkerHandle>,
}

impl SelectService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl SelectPort for SelectService {
    async fn select(&self, duration: TimerDuration) {
        self.worker.select(duration).await
    }
}

#[derive(Debug)]
pub struct StartService {
    worker: Arc<WorkerHandle>,
}

impl StartService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl StartPort for StartService {
    async fn start(&self) -> Result<(), InvalidOperationError> {
        self.worker.start().await
    }
}

#[derive(Debug)]
pub struct PauseService {
    worker: Arc<WorkerHandle>,
}

impl PauseService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl PausePort for PauseService {
    async fn pause(&self) -> Result<(), InvalidOperationError> {
        self.worker.pause().await
    }
}

#[derive(Debug)]
pub struct StopService {
    worker: Arc<WorkerHandle>,
}

impl StopService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl StopPort for StopService {
    async fn stop(&self) {
        self.worker.stop().await
    }
}

#[derive(Debug)]
pub struct SnapshotService {
    worker: Arc<WorkerHandle>,
}

impl SnapshotService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl SnapshotPort for SnapshotService {
    async fn load(&self) {
        self.worker.load().await
    }

    async fn persist(&self) {
        self.worker.persist().await
    }
}

#[derive(Debug)]
pub struct ReconcileService {
    worker: Arc<WorkerHandle>,
}

impl ReconcileService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl ReconcilePort for ReconcileService {
    async fn reconcile(&self) {
        self.worker.reconcile().await
    }
}

#[derive(Debug)]
pub struct QueryService {
    worker: Arc<WorkerHandle>,
}

impl QueryService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl QueryPort for QueryService {
    async fn query(&self) -> TimerSnapshot {
        self.worker.query().await
    }
}

#[derive(Debug)]
pub struct SubscribeService {
    worker: Arc<WorkerHandle>,
}

impl SubscribeService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl SubscribePort for SubscribeService {
    async fn subscribe(&self, observer: Arc<dyn TimerObserver>) {
        self.worker.subscribe(observer).await
    }
}
