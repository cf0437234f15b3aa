use std::fs::{self, File};
use std::io::{Error as IoError, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"
# This configuration file is generated automatically. Feel free to do some
# modification.

# The `timer` section specifies the duration selected at launch, one of 5, 10,
# 15, 30 or 60 seconds. Leave it out to start with nothing selected.
[timer]
# selected = 30

# The `notification` section specifies the alert delivered when a countdown
# completes. Scheduling replaces any pending alert with the same identifier.
# `body` is optional.
[notification]
identifier = "TimerNotification"
summary = "Timer Completed"
body = "Your timer has finished!"

# The `storage` section specifies the slot shared with the widget. The suite
# names a directory under the XDG data directory unless `path` is given.
[storage]
suite = "com.test.widgetData"
key = "SavedSeconds"
# path = "/path/to/defaults.json"

# The `widget` section specifies a command run whenever the timer starts
# running, so the widget can re-render.
[widget]
# refresh = ["countdown-widget"]
"#;

/// A reader which reads the configuration content and writes the default
/// template first if the file is missing and creation is allowed.
pub struct ContentReader {
    path: PathBuf,
    create_new: bool,
}

impl ContentReader {
    /// Creates a new [`ContentReader`].
    pub fn new<P: AsRef<Path>>(path: P, create_new: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_new,
        }
    }

    /// Read content from the file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file doesn't exist and may
    /// not be created, or if any file system operation fails.
    pub fn read(self) -> Result<String, ReadContentError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                ensure!(self.create_new, NotFoundSnafu { path: self.path });
                Self::create_configuration(&self.path)?;
                Ok(DEFAULT_CONTENT.to_owned())
            }
            Err(err) => Err(err).context(FileSystemSnafu {
                when: "Reading configuration",
            }),
        }
    }

    /// Write the default template to `path`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file already exists or could
    /// not be written.
    fn create_configuration(path: &Path) -> Result<(), ReadContentError> {
        tracing::info!(path = %path.display(), "Creating default configuration");

        let mut file = File::options()
            .write(true)
            .create_new(true)
            .open(path)
            .context(FileSystemSnafu {
                when: "Creating configuration file",
            })?;

        file.write_all(DEFAULT_CONTENT.as_bytes())
            .context(FileSystemSnafu {
                when: "Writing default configuration content",
            })
    }
}

/// An error type for reading content from the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Could not open inexistent file {}", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Could not access configuration: {when}"))]
    FileSystem {
        when: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use predicates::path as path_pred;

    #[test]
    fn read_existing_configuration() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");
        file.write_str("[timer]\nselected = 5\n").unwrap();

        let reader = ContentReader::new(file.path(), true);
        assert_eq!(reader.read().unwrap(), "[timer]\nselected = 5\n");
    }

    #[test]
    fn read_missing_configuration() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");

        let res = ContentReader::new(file.path(), false).read();
        assert!(matches!(res, Err(ReadContentError::NotFound { .. })));
        file.assert(path_pred::missing());
    }

    #[test]
    fn read_creates_default_configuration() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");

        let content = ContentReader::new(file.path(), true).read().unwrap();
        assert_eq!(content, DEFAULT_CONTENT);
        file.assert(DEFAULT_CONTENT);
    }
}
