use std::sync::Arc;

use countdown::config::{self, Configuration};
use countdown::domain::widget::WidgetSnapshotReader;
use countdown::host::SystemClock;
use countdown::storage::FileSnapshotStore;
use snafu::{prelude::*, Whatever};

use crate::cli::Arguments;

/// The widget shares its configuration with the timer.
const APP_NAME: &str = "countdown";

pub fn bootstrap(args: &Arguments) -> Result<WidgetSnapshotReader, Whatever> {
    let configuration = configuration(args)?;
    let store = match &configuration.storage.path {
        Some(path) => FileSnapshotStore::new(path),
        None => FileSnapshotStore::with_suite(&configuration.storage.suite)
            .whatever_context("Could not use XDG base directories")?,
    };

    tracing::debug!(path = %store.path().display(), "Reading shared storage");
    Ok(WidgetSnapshotReader::new(
        Arc::new(store),
        Arc::new(SystemClock),
        configuration.storage.key,
    ))
}

fn configuration(args: &Arguments) -> Result<Configuration, Whatever> {
    let res = match &args.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME),
    };

    res.whatever_context("Could not load configuration")
}
