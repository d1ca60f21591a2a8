//! Domain-specific error types using `thiserror`.
//!
//! This module defines the main error enums for the library and UI domains
//! of the application.

use std::result::Result as StdResult;

use {anyhow::Error, sqlx::Error as SqlxError, thiserror::Error};

use crate::{
    config::SettingsError,
    library::{scanner::ScanError, schema::SchemaError},
};

/// Library-related errors.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
    /// Schema initialization error.
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),
    /// Folder scanning error.
    #[error("Scan error: {0}")]
    ScanError(#[from] ScanError),
    /// Invalid book data.
    #[error("Invalid data: {reason}")]
    InvalidData { reason: String },
    /// Record not found.
    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: i64 },
}

/// UI-related errors.
#[derive(Error, Debug)]
pub enum UiError {
    /// GTK/Libadwaita initialization error.
    #[error("UI initialization error: {0}")]
    InitializationError(String),
    /// Settings could not be loaded.
    #[error("Settings error: {0}")]
    SettingsError(#[from] SettingsError),
    /// Library could not be opened.
    #[error("Library error: {0}")]
    LibraryError(#[from] LibraryError),
}

/// Operational error context propagation with `anyhow`.
///
/// This type is used for operational errors that need rich context
/// but don't require specific handling logic.
pub type Result<T> = StdResult<T, Error>;

#[cfg(test)]
mod tests {
    use crate::error::domain::{LibraryError, UiError};

    #[test]
    fn test_library_error_display() {
        let not_found_error = LibraryError::NotFound {
            entity: "book".to_string(),
            id: 123,
        };
        assert_eq!(
            not_found_error.to_string(),
            "Record not found: book with id 123"
        );

        let invalid_data_error = LibraryError::InvalidData {
            reason: "test reason".to_string(),
        };
        assert_eq!(invalid_data_error.to_string(), "Invalid data: test reason");
    }

    #[test]
    fn test_ui_error_wraps_library_error() {
        let ui_error = UiError::from(LibraryError::InvalidData {
            reason: "empty name".to_string(),
        });
        assert_eq!(
            ui_error.to_string(),
            "Library error: Invalid data: empty name"
        );

        let init_error = UiError::InitializationError("no display".to_string());
        assert_eq!(init_error.to_string(), "UI initialization error: no display");
    }
}
