mod cli;
mod setup;

use clap::Parser;
use snafu::{prelude::*, Whatever};
use tokio::io::BufReader;

use crate::cli::Arguments;

#[snafu::report]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Whatever> {
    let args = Arguments::parse();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(args.verbosity)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .whatever_context("Could not setup logger")?;

    let shell = setup::bootstrap(&args).await?;

    shell
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .whatever_context("Shell failed to serve")?;

    Ok(())
}
