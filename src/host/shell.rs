use std::error::Error as StdError;
use std::io::Error as IoError;
use std::num::ParseIntError;
use std::str::FromStr;

use snafu::prelude::*;
use snafu::ChainCompat;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::entity::duration::TryNewTimerDurationError;
use crate::domain::entity::{RunMode, TimerDuration, TimerSnapshot};
use crate::domain::timer::inbound::InvalidOperationError;
use crate::domain::timer::ApplicationCore;

/// A line typed into the [`Shell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// Choose the countdown length
    Select(TimerDuration),
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Pause when running, start otherwise
    Toggle,
    /// Reset the countdown
    Stop,
    /// Show the timer's status
    Status,
    /// The view became visible
    Show,
    /// The view was hidden
    Hide,
    /// The app resumed from the background
    Foreground,
    /// List the selectable durations
    Options,
    /// Leave the shell
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ParseShellCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default();

        let command = match name {
            "select" => {
                let input = words.next().context(MissingDurationSnafu)?;
                let seconds = input
                    .parse::<u64>()
                    .context(InvalidNumberSnafu { input })?;
                Self::Select(TimerDuration::try_new(seconds).context(DurationSnafu)?)
            }
            "start" => Self::Start,
            "pause" => Self::Pause,
            "toggle" => Self::Toggle,
            "stop" => Self::Stop,
            "status" => Self::Status,
            "show" => Self::Show,
            "hide" => Self::Hide,
            "foreground" => Self::Foreground,
            "options" => Self::Options,
            "quit" | "exit" => Self::Quit,
            _ => return UnknownSnafu { command: name }.fail(),
        };

        if let Some(argument) = words.next() {
            return UnexpectedArgumentSnafu { argument }.fail();
        }
        Ok(command)
    }
}

/// An error for parsing a [`ShellCommand`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ParseShellCommandError {
    #[snafu(display("Unknown command '{command}'"))]
    Unknown { command: String },
    #[snafu(display("Unexpected argument '{argument}'"))]
    UnexpectedArgument { argument: String },
    #[snafu(display("Missing duration to select"))]
    MissingDuration,
    #[snafu(display("Could not parse duration '{input}'"))]
    InvalidNumber { input: String, source: ParseIntError },
    #[snafu(display("Could not select duration"))]
    Duration { source: TryNewTimerDurationError },
}

/// A line-oriented stand-in for the timer's view. Every line read from the
/// input is one user interaction or host lifecycle event.
pub struct Shell {
    core: ApplicationCore,
}

impl Shell {
    /// Creates a new [`Shell`].
    pub fn new(core: ApplicationCore) -> Self {
        Self { core }
    }

    /// Serve commands from `input` until it ends or `quit` is read. The
    /// snapshot is loaded before the first command and persisted on the way
    /// out, as a view would on appearing and disappearing. Replies and
    /// rejected commands are written to `output`.
    ///
    /// # Errors
    ///
    /// This function will return an error if reading `input` or writing
    /// `output` fails.
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.core.snapshot.load().await;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context(InputSnafu)? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let reply = match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => match self.execute(command).await {
                    Ok(reply) => reply,
                    Err(err) => Some(format!("error: {err}")),
                },
                Err(err) => Some(format!("error: {}", one_line(&err))),
            };

            if let Some(reply) = reply {
                output
                    .write_all(format!("{reply}\n").as_bytes())
                    .await
                    .context(OutputSnafu)?;
                output.flush().await.context(OutputSnafu)?;
            }
        }

        self.core.snapshot.persist().await;
        Ok(())
    }

    /// Run a single command and return the text to show, if any.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer refuses the operation.
    pub async fn execute(
        &self,
        command: ShellCommand,
    ) -> Result<Option<String>, InvalidOperationError> {
        match command {
            ShellCommand::Select(duration) => self.core.select.select(duration).await,
            ShellCommand::Start => self.core.start.start().await?,
            ShellCommand::Pause => self.core.pause.pause().await?,
            ShellCommand::Toggle => self.toggle().await?,
            ShellCommand::Stop => self.core.stop.stop().await,
            ShellCommand::Status => {
                let snapshot = self.core.query.query().await;
                return Ok(Some(status(&snapshot)));
            }
            ShellCommand::Show => self.core.snapshot.load().await,
            ShellCommand::Hide => self.core.snapshot.persist().await,
            ShellCommand::Foreground => self.core.reconcile.reconcile().await,
            ShellCommand::Options => {
                let options = TimerDuration::options()
                    .map(|duration| duration.to_string())
                    .collect::<Vec<_>>();
                return Ok(Some(options.join(", ")));
            }
            ShellCommand::Quit => {}
        }
        Ok(None)
    }

    async fn toggle(&self) -> Result<(), InvalidOperationError> {
        match self.core.query.query().await.mode {
            RunMode::Running => self.core.pause.pause().await,
            RunMode::Idle | RunMode::Paused => self.core.start.start().await,
        }
    }
}

/// An error and its sources on a single line.
fn one_line(error: &dyn StdError) -> String {
    ChainCompat::new(error)
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

fn status(snapshot: &TimerSnapshot) -> String {
    let selected = match snapshot.selected {
        Some(duration) => duration.to_string(),
        None => "none".to_owned(),
    };

    let mut outputs = vec![
        ("Mode", snapshot.mode.to_string()),
        ("Remaining", snapshot.display_time()),
        ("Selected", selected),
    ];

    if let Some(at) = snapshot.scheduled_completion_at {
        outputs.push(("Completion", at.to_rfc3339()));
    }

    let key_align = outputs
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or_default();

    outputs
        .into_iter()
        .map(|(key, value)| format!("{key:<key_align$} = {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// An error for serving the shell.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ShellError {
    #[snafu(display("Could not read command"))]
    Input { source: IoError },
    #[snafu(display("Could not write reply"))]
    Output { source: IoError },
}
