//! Operational error context propagation with `anyhow`.
//!
//! This module provides extension traits for adding context to errors and a
//! central place to log failures that the shelf recovers from.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Error, Result as AnyhowResult},
    tracing::{debug, error, warn},
};

/// Extension trait for enhanced error context.
pub trait ResultExt<T, E> {
    /// Adds context to an error with a static string.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Adds context to an error with a formatted string.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// How loudly a recovered error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected in normal operation.
    Debug,
    /// The user may notice degraded behavior.
    Warn,
    /// Something the user asked for did not happen.
    Error,
}

/// Centralized error reporting and logging.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Logs an error with its full context chain.
    pub fn report(severity: Severity, error: &Error, context: &str) {
        match severity {
            Severity::Debug => debug!(context = context, error = %format!("{:#}", error), "Recovered error"),
            Severity::Warn => warn!(context = context, error = %format!("{:#}", error), "Recovered error"),
            Severity::Error => error!(context = context, error = %format!("{:#}", error), "Operation failed"),
        }
    }

    /// Message suitable for a dialog: the outermost context followed by the
    /// root cause, when they differ.
    pub fn to_user_message(error: &Error) -> String {
        let top = error.to_string();
        let root = error.root_cause().to_string();
        if root == top {
            top
        } else {
            format!("{}: {}", top, root)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Error as IoError, ErrorKind::PermissionDenied};

    use anyhow::anyhow;

    use crate::error::operational::{ErrorReporter, ResultExt, Severity};

    #[test]
    fn test_result_ext_with_context() {
        let result: Result<(), IoError> = Err(IoError::new(PermissionDenied, "denied"));
        let error = result.add_context("Opening the book database").unwrap_err();

        assert_eq!(error.to_string(), "Opening the book database");
        assert_eq!(error.root_cause().to_string(), "denied");
    }

    #[test]
    fn test_result_ext_with_contextf() {
        let result: Result<(), IoError> = Err(IoError::new(PermissionDenied, "denied"));
        let error = result
            .add_contextf(format!("Scanning {}", "/books"))
            .unwrap_err();

        assert!(error.to_string().contains("Scanning /books"));
    }

    #[test]
    fn test_user_message_includes_root_cause() {
        let result: Result<(), IoError> = Err(IoError::new(PermissionDenied, "denied"));
        let error = result.add_context("Saving settings").unwrap_err();
        assert_eq!(ErrorReporter::to_user_message(&error), "Saving settings: denied");

        let plain = anyhow!("Test error message");
        assert_eq!(ErrorReporter::to_user_message(&plain), "Test error message");
    }

    #[test]
    fn test_report_does_not_panic_without_subscriber() {
        let error = anyhow!("scan failed");
        for severity in [Severity::Debug, Severity::Warn, Severity::Error] {
            ErrorReporter::report(severity, &error, "test");
        }
    }
}
