mod content;
mod reader;

use std::path::Path;

pub use content::{Configuration, NotificationContent, StorageContent, TimerContent, WidgetContent};
pub use reader::{ReadContentError, DEFAULT_CONTENT};

use snafu::prelude::*;
use toml::de::Error as DeError;

use crate::utils::xdg::{Xdg, XdgError};

use reader::ContentReader;

/// Name of the configuration file in the application's XDG directory.
pub const FILE_NAME: &str = "config.toml";

/// Read the configuration file at `path`, which must exist. Both surfaces
/// use this for `--config`.
///
/// # Errors
///
/// This function will return an error if the file can't be read or its
/// content is invalid.
pub fn load_with_path<P: AsRef<Path>>(path: P) -> Result<Configuration, LoadConfigurationError> {
    let content = ContentReader::new(path, false).read().context(ReadSnafu)?;
    parse(&content)
}

/// Read `config.toml` from the XDG configuration directory of `app_name`,
/// writing the default template there first if it's missing.
///
/// # Errors
///
/// This function will return an error if the XDG directory is unusable, the
/// file can't be read or created, or its content is invalid.
pub fn load_with_xdg(app_name: &str) -> Result<Configuration, LoadConfigurationError> {
    let path = Xdg::new(app_name)
        .and_then(|xdg| xdg.config_file(FILE_NAME))
        .context(XdgConfigSnafu)?;
    let content = ContentReader::new(path, true).read().context(ReadSnafu)?;
    parse(&content)
}

/// Parse configuration content.
///
/// # Errors
///
/// This function will return an error if `content` is not a valid
/// configuration.
pub fn parse(content: &str) -> Result<Configuration, LoadConfigurationError> {
    toml::from_str(content).context(ParseSnafu)
}

/// An error type for loading configuraton from files.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum LoadConfigurationError {
    #[snafu(display("Could not resolve XDG configuration directory"))]
    XdgConfig { source: XdgError },
    #[snafu(display("Could not read content from file"))]
    Read { source: ReadContentError },
    #[snafu(display("Could not parse invalid configurations"))]
    Parse { source: DeError },
}
