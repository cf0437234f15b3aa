use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

/// Render the remaining time last saved by the countdown timer
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Maximum logging level the subscriber should use
    #[arg(short, long, default_value_t = Level::WARN)]
    pub verbosity: Level,
    /// How the entry is printed
    #[arg(short, long, value_enum, default_value_t = Format::Raw)]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Remaining seconds as an integer
    Raw,
    /// Remaining time as MM:SS
    Clock,
    /// The whole entry as a JSON object
    Json,
}
