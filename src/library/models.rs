//! Data models for the audiobook library.
//!
//! This module defines the book records stored in the database and shown on
//! the shelf, with serde serialization.

use {
    serde::{Deserialize, Serialize},
    sqlx::FromRow,
};

/// An audiobook on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Default)]
pub struct Book {
    /// Unique database ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Author (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Folder or single file the book was discovered at.
    pub root: String,
    /// Total duration in milliseconds.
    pub duration_ms: i64,
    /// Playback position in milliseconds.
    pub position_ms: i64,
}

impl Book {
    /// Listening progress in the range `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0 {
            return 0.0;
        }
        (self.position_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }
}

/// A book discovered on disk that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    /// Display name.
    pub name: String,
    /// Author (if known).
    pub author: Option<String>,
    /// Folder or single file the book was discovered at.
    pub root: String,
    /// Total duration in milliseconds.
    pub duration_ms: i64,
}
