use std::collections::HashMap;
use std::sync::Arc;

use notify_rust::Notification;
use snafu::prelude::*;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::timer::outbound::{
    Clock, NotificationScheduler, ScheduleNotificationError, ScheduleRequest,
};
use crate::tracing_report;

/// A [`NotificationScheduler`] which delivers desktop notifications. Each
/// pending request is a sleeping task keyed by its identifier, so scheduling
/// the same identifier again replaces it.
pub struct DesktopScheduler {
    app_name: String,
    clock: Arc<dyn Clock>,
    pending: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl DesktopScheduler {
    pub fn new(app_name: String, clock: Arc<dyn Clock>) -> Self {
        Self {
            app_name,
            clock,
            pending: Mutex::new(HashMap::new()),
        }
    }

    async fn deliver(app_name: String, request: ScheduleRequest) {
        let mut notification = Notification::new();
        notification.appname(&app_name);
        notification.summary(&request.summary);

        if let Some(body) = &request.body {
            notification.body(body);
        }

        match notification.show_async().await {
            Ok(_) => tracing::info!(identifier = %request.identifier, "Delivered notification"),
            Err(err) => tracing_report!(error, err, "Could not show notification"),
        }
    }
}

#[async_trait::async_trait]
impl NotificationScheduler for DesktopScheduler {
    async fn schedule_impl(&self, request: ScheduleRequest) -> Result<(), ScheduleNotificationError> {
        let delay = match (request.fire_at - self.clock.now()).to_std() {
            Ok(delay) if !delay.is_zero() => delay,
            _ => whatever!("Delivery time {} is not in the future", request.fire_at),
        };

        let identifier = request.identifier.clone();
        let app_name = self.app_name.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Self::deliver(app_name, request).await;
        });

        let mut pending = self.pending.lock().await;
        pending.retain(|_, task| !task.is_finished());
        if let Some(previous) = pending.insert(identifier, task) {
            previous.abort();
        }
        Ok(())
    }

    async fn cancel(&self, identifier: &str) {
        if let Some(task) = self.pending.lock().await.remove(identifier) {
            task.abort();
        }
    }
}
