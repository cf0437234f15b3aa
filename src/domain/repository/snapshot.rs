use std::error::Error as StdError;

use snafu::prelude::*;

/// A key-value slot shared between the timer and the widget. There is no
/// locking: the last writer wins and readers may observe stale values.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync + 'static {
    /// Read the integer stored under `key`. An absent key, or a value that is
    /// not a non-negative integer, yields `None`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store is unavailable.
    async fn get(&self, key: &str) -> Result<Option<u64>, StorageError>;

    /// Overwrite the integer stored under `key`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store is unavailable.
    async fn set(&self, key: &str, value: u64) -> Result<(), StorageError>;
}

/// An error type of accessing a [`SnapshotStore`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum StorageError {
    #[snafu(whatever, display("Shared storage is unavailable: {message}"))]
    #[non_exhaustive]
    Unavailable {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}
