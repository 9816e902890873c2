//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business rejections are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::domain::NotificationError;
use crate::error::ErrorCategory;

/// Errors that occur while orchestrating community operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The log sink could not be written or read.
    #[error("Activity log {operation} failed: {reason}")]
    LogSink {
        operation: &'static str,
        reason: String,
    },

    /// A process-wide instance was configured after it had been created.
    #[error("The global {name} is already initialized")]
    GlobalAlreadyInitialized { name: &'static str },

    /// One or more topic observers rejected a notification.
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::LogSink { .. } => vec![
                "Check that the log file location is writable".into(),
                "Set log.path in the config file or CAFE_LOG__PATH".into(),
            ],
            Self::GlobalAlreadyInitialized { name } => vec![
                format!("Configure the {name} before its first use"),
            ],
            Self::Notification(e) => e
                .failures
                .iter()
                .map(|f| format!("{} rejected the event: {}", f.observer, f.error))
                .collect(),
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LogSink { .. } => ErrorCategory::Configuration,
            Self::GlobalAlreadyInitialized { .. } => ErrorCategory::Internal,
            Self::Notification(_) => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ObserverError, ObserverFailure};

    #[test]
    fn notification_suggestions_name_each_observer() {
        let err = ApplicationError::from(NotificationError {
            title: "T".into(),
            change: "created",
            attempted: 2,
            failures: vec![ObserverFailure {
                observer: "moderator#7 (@ana)".into(),
                error: ObserverError::new("inbox full"),
            }],
        });
        assert_eq!(err.to_string(), "1 of 2 observers failed on 'T' (created)");
        assert_eq!(
            err.suggestions(),
            ["moderator#7 (@ana) rejected the event: inbox full"]
        );
    }

    #[test]
    fn sink_failures_point_at_configuration() {
        let err = ApplicationError::LogSink {
            operation: "append",
            reason: "disk full".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.to_string(), "Activity log append failed: disk full");
    }
}
