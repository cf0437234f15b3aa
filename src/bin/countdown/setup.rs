use std::sync::Arc;

use countdown::config::{self, Configuration};
use countdown::domain::timer::outbound::{Clock, TimerObserver};
use countdown::domain::timer::{ApplicationCore, TimerDependencies};
use countdown::host::{ConsoleObserver, DesktopScheduler, Shell, SystemClock, WidgetRefresher};
use countdown::repository::{DurationConfiguration, NotificationConfiguration};
use countdown::storage::FileSnapshotStore;
use snafu::{prelude::*, Whatever};

use crate::cli::Arguments;

const APP_NAME: &str = "countdown";

pub async fn bootstrap(args: &Arguments) -> Result<Shell, Whatever> {
    let configuration = configuration(args)?;
    let store = store(&configuration)?;
    let core = core(args, configuration, store).await?;
    Ok(Shell::new(core))
}

fn configuration(args: &Arguments) -> Result<Arc<Configuration>, Whatever> {
    let res = match &args.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME),
    };

    let configuration = res.whatever_context("Could not load configuration")?;
    Ok(Arc::new(configuration))
}

fn store(configuration: &Configuration) -> Result<FileSnapshotStore, Whatever> {
    let store = match &configuration.storage.path {
        Some(path) => FileSnapshotStore::new(path),
        None => FileSnapshotStore::with_suite(&configuration.storage.suite)
            .whatever_context("Could not use XDG base directories")?,
    };

    tracing::debug!(path = %store.path().display(), "Using shared storage");
    Ok(store)
}

fn observers(args: &Arguments, configuration: &Configuration) -> Vec<Arc<dyn TimerObserver>> {
    let mut observers: Vec<Arc<dyn TimerObserver>> = Vec::new();

    if !args.quiet {
        observers.push(Arc::new(ConsoleObserver::stdout()));
    }

    let refresh = configuration.widget.refresh.clone().unwrap_or_default();
    if let Some(refresher) = WidgetRefresher::new(refresh) {
        observers.push(Arc::new(refresher));
    }

    observers
}

async fn core(
    args: &Arguments,
    configuration: Arc<Configuration>,
    store: FileSnapshotStore,
) -> Result<ApplicationCore, Whatever> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let scheduler = Arc::new(DesktopScheduler::new(
        APP_NAME.to_owned(),
        Arc::clone(&clock),
    ));

    let dependencies = TimerDependencies {
        scheduler,
        store: Arc::new(store),
        clock,
        duration_repository: Arc::new(DurationConfiguration::new(Arc::clone(&configuration))),
        notification_repository: Arc::new(NotificationConfiguration::new(Arc::clone(
            &configuration,
        ))),
        observers: observers(args, &configuration),
        snapshot_key: configuration.storage.key.clone(),
    };

    let core = ApplicationCore::setup(dependencies)
        .await
        .whatever_context("Could not setup application core")?;

    Ok(core)
}
