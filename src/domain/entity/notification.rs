use snafu::prelude::*;

/// Content of the alert delivered when a countdown completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    identifier: String,
    summary: String,
    body: Option<String>,
}

impl NotificationMessage {
    /// Try to create a [`NotificationMessage`]. Scheduling a message replaces
    /// any pending one with the same identifier.
    ///
    /// # Errors
    ///
    /// This function will return an error if the identifier or the summary is
    /// empty.
    pub fn try_new(
        identifier: String,
        summary: String,
        body: Option<String>,
    ) -> Result<Self, TryNewNotificationMessageError> {
        ensure!(!identifier.is_empty(), EmptyIdentifierSnafu);
        ensure!(!summary.is_empty(), EmptySummarySnafu);
        Ok(Self {
            identifier,
            summary,
            body,
        })
    }

    /// Returns the identifier of this [`NotificationMessage`].
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns a reference to the summary of this [`NotificationMessage`].
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the body of this [`NotificationMessage`].
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// An error type of creating a [`NotificationMessage`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewNotificationMessageError {
    #[snafu(display("Identifier of a notification must be non-empty."))]
    #[non_exhaustive]
    EmptyIdentifier,
    #[snafu(display("Summary of a notification must be non-empty."))]
    #[non_exhaustive]
    EmptySummary,
}
