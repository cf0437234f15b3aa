use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Run the countdown timer, reading commands line by line from stdin
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Maximum logging level the subscriber should use
    #[arg(short, long, default_value_t = Level::INFO)]
    pub verbosity: Level,
    /// Don't print the display time on every change
    #[arg(short, long)]
    pub quiet: bool,
}
