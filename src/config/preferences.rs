//! Narrow preference interface used by the shelf controller.

use std::sync::Arc;

use tracing::warn;

use crate::{config::settings::SettingsManager, state::DisplayMode};

/// Preferences the shelf reads and writes.
///
/// Writes never fail from the caller's point of view; implementations log
/// persistence problems and keep the new value in memory.
pub trait ShelfPreferences {
    /// Currently selected display mode.
    fn display_mode(&self) -> DisplayMode;

    /// Stores a new display mode.
    fn set_display_mode(&self, mode: DisplayMode);

    /// Identifier of the book last loaded into the player.
    fn current_book_id(&self) -> Option<i64>;

    /// Marks a book as the current one.
    fn set_current_book_id(&self, book_id: i64);
}

impl ShelfPreferences for SettingsManager {
    fn display_mode(&self) -> DisplayMode {
        self.get_settings().display_mode
    }

    fn set_display_mode(&self, mode: DisplayMode) {
        if let Err(e) = self.modify(|s| s.display_mode = mode) {
            warn!("Failed to persist display mode {:?}: {}", mode, e);
        }
    }

    fn current_book_id(&self) -> Option<i64> {
        self.get_settings().current_book_id
    }

    fn set_current_book_id(&self, book_id: i64) {
        if let Err(e) = self.modify(|s| s.current_book_id = Some(book_id)) {
            warn!("Failed to persist current book {}: {}", book_id, e);
        }
    }
}

impl<T: ShelfPreferences + ?Sized> ShelfPreferences for Arc<T> {
    fn display_mode(&self) -> DisplayMode {
        (**self).display_mode()
    }

    fn set_display_mode(&self, mode: DisplayMode) {
        (**self).set_display_mode(mode);
    }

    fn current_book_id(&self) -> Option<i64> {
        (**self).current_book_id()
    }

    fn set_current_book_id(&self, book_id: i64) {
        (**self).set_current_book_id(book_id);
    }
}
