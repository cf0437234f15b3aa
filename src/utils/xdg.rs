use std::io::Error as IoError;
use std::path::PathBuf;
use std::sync::Arc;

use snafu::prelude::*;
use xdg::{BaseDirectories, BaseDirectoriesError};

/// Files of one namespace in the XDG base directories. The timer's
/// configuration lives in the `countdown` namespace, the shared slot in the
/// suite's namespace.
pub struct Xdg {
    base: BaseDirectories,
}

impl Xdg {
    /// Create a [`Xdg`] scoped to `namespace`.
    ///
    /// # Errors
    ///
    /// This function will return an error if XDG settings is missing.
    pub fn new(namespace: &str) -> Result<Self, XdgError> {
        let base = BaseDirectories::with_prefix(namespace).context(InitSnafu)?;
        Ok(Self { base })
    }

    /// Path of `file` in the configuration directory. Leading directories
    /// are created.
    ///
    /// # Errors
    ///
    /// This function will return an error if creating directories fails.
    pub fn config_file(&self, file: &str) -> Result<PathBuf, XdgError> {
        self.base
            .place_config_file(file)
            .context(CreateDirectorySnafu { kind: "configuration" })
    }

    /// Path of `file` in the data directory. Nothing is created; writers make
    /// the directory when they need it.
    pub fn data_file(&self, file: &str) -> PathBuf {
        self.base.get_data_file(file)
    }
}

/// An error for XDG-related operations.
#[derive(Debug, Snafu, Clone)]
pub enum XdgError {
    #[snafu(display("Could not get XDG settings"))]
    Init {
        #[snafu(source(from(BaseDirectoriesError, Arc::new)))]
        source: Arc<BaseDirectoriesError>,
    },
    #[snafu(display("Could not create {kind} directory"))]
    CreateDirectory {
        kind: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
