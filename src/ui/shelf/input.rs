//! User input collected by the shelf widgets.
//!
//! Widgets never call the controller directly; they queue inputs that the
//! application loop hands to the controller one at a time.

use crate::ui::shelf::controller::{ClickType, MenuAction};

/// Something the user did on the shelf screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShelfInput {
    /// A row was clicked.
    BookClicked { book_id: i64, click: ClickType },
    /// The play/pause button was pressed.
    PlayPause,
    /// A header bar menu entry was activated.
    Menu(MenuAction),
    /// The menu should be rebuilt from the controller state.
    RefreshMenu,
    /// The edit sheet confirmed a new name.
    RenameBook { book_id: i64, name: String },
    /// The audiobook folders should be scanned again.
    Rescan,
    /// The shelf width changed.
    WidthChanged(u32),
    /// The grid columns should be recomputed for the current width.
    Relayout,
}
