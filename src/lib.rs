//! Audioshelf - Audiobook Shelf
//!
//! An offline audiobook library for the GNOME desktop. Audiobook folders are
//! scanned into a SQLite database and shown on a shelf that switches between
//! a cover grid and a list, remembers the book currently loaded in the
//! player and opens books on a detail page.

pub mod config;
pub mod error;
pub mod library;
pub mod state;
pub mod ui;

// Re-export key types for convenience
pub use {
    config::{SettingsManager, ShelfPreferences, UserSettings},
    error::{LibraryError, UiError},
    library::{Book, BookDatabase, BookScanner, NewBook},
    state::{DisplayMode, PlayPauseRequester, ShelfEvent, ShelfPresenter},
    ui::{AudioshelfApplication, ShelfController},
};
