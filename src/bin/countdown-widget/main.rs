mod cli;
mod setup;

use clap::Parser;
use countdown::domain::widget::WidgetEntry;
use snafu::{prelude::*, Whatever};

use crate::cli::{Arguments, Format};

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

    let reader = setup::bootstrap(&args)?;
    let entry = reader.render().await;
    println!("{}", format(&entry, args.format)?);

    Ok(())
}

fn format(entry: &WidgetEntry, format: Format) -> Result<String, Whatever> {
    let output = match format {
        Format::Raw => entry.display_value.to_string(),
        Format::Clock => entry.display_time(),
        Format::Json => {
            serde_json::to_string(entry).whatever_context("Could not serialize widget entry")?
        }
    };
    Ok(output)
}
