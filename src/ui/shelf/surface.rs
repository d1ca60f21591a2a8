//! Collaborator traits the shelf controller drives.

use crate::{library::Book, state::DisplayMode, ui::shelf::layout::ShelfLayout};

/// Row list of the shelf.
pub trait ShelfAdapter {
    /// Replaces every row.
    fn new_data_set(&mut self, books: Vec<Book>);

    /// Rows currently held, in display order.
    fn books(&self) -> &[Book];

    /// Number of rows.
    fn item_count(&self) -> usize {
        self.books().len()
    }

    /// Book id at a position.
    fn item_id(&self, position: usize) -> Option<i64> {
        self.books().get(position).map(|b| b.id)
    }

    /// Switches how rows render themselves.
    fn set_display_mode(&mut self, mode: DisplayMode);

    /// Re-renders a single row.
    fn notify_item_changed(&mut self, position: usize);
}

/// State of a row that is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRow {
    /// The row shows the "current book" indicator.
    pub indicator_visible: bool,
}

/// Play/pause button icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    /// Symbolic icon name.
    #[must_use]
    pub fn icon_name(self) -> &'static str {
        match self {
            PlayIcon::Play => "media-playback-start-symbolic",
            PlayIcon::Pause => "media-playback-pause-symbolic",
        }
    }
}

/// Everything around the row list: layout, buttons and dialogs.
pub trait ShelfView {
    /// Installs a layout manager and adds or removes the list divider.
    fn apply_layout(&mut self, layout: ShelfLayout);

    /// The rendered row for a book, if there is one.
    fn visible_row(&self, book_id: i64) -> Option<VisibleRow>;

    /// Shows or hides the play/pause button.
    fn set_fab_visible(&mut self, visible: bool);

    /// Switches the play/pause icon.
    fn set_play_icon(&mut self, icon: PlayIcon, animate: bool);

    /// Shows or hides the loading indicator.
    fn set_loading_visible(&mut self, visible: bool);

    /// Whether the no-folder warning is on screen.
    fn is_no_folder_warning_showing(&self) -> bool;

    /// Presents the no-folder warning.
    fn show_no_folder_warning(&mut self);

    /// Opens the edit sheet for a book.
    fn show_edit_book(&mut self, book: &Book);

    /// Asks the menu to rebuild itself from the controller's menu state.
    fn invalidate_menu(&mut self);
}
