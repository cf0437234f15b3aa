use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::notification::{NotificationMessage, TryNewNotificationMessageError};

/// An abstract interface for accessing the completion alert's content.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NotificationRepository: Send + Sync + 'static {
    /// Get the message delivered when a countdown completes.
    ///
    /// # Errors
    ///
    /// This function will return an error if the message is invalid or could
    /// not be loaded.
    async fn completion_notification(&self) -> Result<NotificationMessage, GetNotificationError>;
}

/// An error type of accessing the repository of [`NotificationMessage`]s.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum GetNotificationError {
    #[snafu(display("Could not create an invalid notification message"))]
    #[non_exhaustive]
    Invalid {
        source: TryNewNotificationMessageError,
    },
    #[snafu(whatever, display("an internal error occurred."))]
    #[non_exhaustive]
    Internal {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notification_repository_get() {
        let mut mock = MockNotificationRepository::new();
        mock.expect_completion_notification().return_once(|| {
            Ok(NotificationMessage::try_new("id".into(), "summary".into(), None).unwrap())
        });
        assert_eq!(
            mock.completion_notification().await.unwrap(),
            NotificationMessage::try_new("id".into(), "summary".into(), None).unwrap()
        );
    }
}
