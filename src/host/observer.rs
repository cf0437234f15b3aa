use std::io::{Error as IoError, Stdout, Write};
use std::process::{ExitStatus, Stdio};
use std::sync::Mutex;

use snafu::prelude::*;
use tokio::process::Command;

use crate::domain::timer::outbound::{TimerEvent, TimerObserver};
use crate::tracing_report;

/// A [`TimerObserver`] printing the display time and mode on every change.
pub struct ConsoleObserver<W> {
    output: Mutex<W>,
}

impl<W: Write + Send + 'static> ConsoleObserver<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
        }
    }
}

impl ConsoleObserver<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> TimerObserver for ConsoleObserver<W> {
    fn notify(&self, event: &TimerEvent) {
        let TimerEvent::Changed(snapshot) = event else {
            return;
        };

        let Ok(mut output) = self.output.lock() else {
            return;
        };
        let res = writeln!(output, "{} {}", snapshot.display_time(), snapshot.mode)
            .and_then(|()| output.flush());
        if let Err(err) = res {
            tracing_report!(warn, err, "Could not print timer state");
        }
    }
}

/// A [`TimerObserver`] running an external command each time the timer enters
/// the running mode, so the widget surface renders the fresh snapshot.
#[derive(Debug, Clone)]
pub struct WidgetRefresher {
    program: String,
    args: Vec<String>,
}

impl WidgetRefresher {
    /// Creates a new [`WidgetRefresher`] from a command line. Returns `None`
    /// if `command` is empty.
    pub fn new(command: Vec<String>) -> Option<Self> {
        let mut command = command.into_iter();
        let program = command.next()?;
        Some(Self {
            program,
            args: command.collect(),
        })
    }

    /// Run the refresh command and wait for it to exit.
    ///
    /// # Errors
    ///
    /// This function will return an error if the command could not be spawned
    /// or exited unsuccessfully.
    pub async fn refresh(&self) -> Result<(), RefreshWidgetError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await
            .context(SpawnSnafu {
                program: self.program.clone(),
            })?;

        ensure!(status.success(), StatusSnafu { status });
        Ok(())
    }
}

impl TimerObserver for WidgetRefresher {
    fn notify(&self, event: &TimerEvent) {
        if !matches!(event, TimerEvent::BecameRunning(_)) {
            return;
        }

        let refresher = self.clone();
        tokio::spawn(async move {
            match refresher.refresh().await {
                Ok(()) => tracing::debug!(program = %refresher.program, "Refreshed widget"),
                Err(err) => tracing_report!(warn, err, "Could not refresh widget"),
            }
        });
    }
}

/// An error for running the widget refresh command.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RefreshWidgetError {
    #[snafu(display("Could not run {program}"))]
    Spawn { program: String, source: IoError },
    #[snafu(display("Refresh command exited abnormally with {status}"))]
    Status { status: ExitStatus },
}
