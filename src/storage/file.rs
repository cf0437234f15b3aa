use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use snafu::prelude::*;

use crate::domain::repository::snapshot::{SnapshotStore, StorageError};
use crate::utils::xdg::{Xdg, XdgError};

const SUITE_FILE: &str = "defaults.json";

/// A [`SnapshotStore`] kept as a flat JSON object in one file. Writers replace
/// the whole file by renaming a sibling, so a reader sees either the old or the
/// new content.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Creates a new [`FileSnapshotStore`] backed by the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a new [`FileSnapshotStore`] in the XDG data directory of the
    /// named suite, shared by every surface using the same suite name.
    ///
    /// # Errors
    ///
    /// This function will return an error if XDG settings are missing.
    pub fn with_suite(suite: &str) -> Result<Self, XdgError> {
        let path = Xdg::new(suite)?.data_file(SUITE_FILE);
        Ok(Self::new(path))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_content(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_whatever_context(|_| {
                format!("Could not read {}", self.path.display())
            }),
        }
    }

    async fn read_values(&self) -> Result<Map<String, Value>, StorageError> {
        match self.read_content().await? {
            Some(content) => serde_json::from_str(&content)
                .with_whatever_context(|_| format!("Malformed suite {}", self.path.display())),
            None => Ok(Map::new()),
        }
    }

    async fn write_values(&self, values: &Map<String, Value>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(values)
            .whatever_context("Could not serialize suite")?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_whatever_context(|_| format!("Could not create {}", parent.display()))?;
        }

        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, content)
            .await
            .with_whatever_context(|_| format!("Could not write {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_whatever_context(|_| format!("Could not replace {}", self.path.display()))
    }
}

#[async_trait::async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<u64>, StorageError> {
        let values = self.read_values().await?;
        Ok(values.get(key).and_then(Value::as_u64))
    }

    async fn set(&self, key: &str, value: u64) -> Result<(), StorageError> {
        let mut values: Map<String, Value> = match self.read_content().await? {
            Some(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!(%err, path = %self.path.display(), "Discarding malformed suite");
                    Map::new()
                }
            },
            None => Map::new(),
        };

        values.insert(key.to_owned(), Value::from(value));
        self.write_values(&values).await
    }
}
