//! The book shelf page.
//!
//! This module implements `BookShelfPage`, the GTK surface driven by the
//! shelf controller. It renders the books as a grid or a list, owns the
//! play/pause button and the loading spinner, and presents the no-folder
//! warning and the edit sheet. Everything the user does is queued as a
//! [`ShelfInput`].

use std::{cell::Cell, rc::Rc, sync::Arc};

use {
    async_channel::Sender,
    libadwaita::{
        AlertDialog, ResponseAppearance, Spinner, StatusPage, ToolbarView,
        gtk::{
            AccessibleRole::Grid,
            Align::{Center, Fill, Start},
            Button, Entry, FlowBox, ListBox, Overlay, PolicyType, ScrolledWindow,
            SelectionMode::None as SelectionNone,
            Stack,
        },
        prelude::*,
    },
    tracing::debug,
};

use crate::{
    config::SettingsManager,
    library::Book,
    state::DisplayMode,
    ui::{
        components::{
            book_card::{BookCard, CardClickHandler},
            play_button::PlayButton,
        },
        header_bar::ShelfHeaderBar,
        shelf::{
            LayoutManager, MenuAction, PlayIcon, ShelfAdapter, ShelfInput, ShelfLayout,
            ShelfView, VisibleRow,
        },
    },
};

const GRID_PAGE: &str = "grid";
const LIST_PAGE: &str = "list";
const EMPTY_PAGE: &str = "empty";

/// Responses of the no-folder warning.
const RESPONSE_LATER: &str = "later";
const RESPONSE_SETTINGS: &str = "settings";
/// Responses of the edit sheet.
const RESPONSE_CANCEL: &str = "cancel";
const RESPONSE_RENAME: &str = "rename";

/// GTK rendition of the shelf.
pub struct BookShelfPage {
    /// Root widget of the page.
    pub widget: ToolbarView,
    /// Header bar holding the menu entries.
    pub header_bar: ShelfHeaderBar,
    flow_box: FlowBox,
    list_box: ListBox,
    stack: Stack,
    spinner: Spinner,
    play_button: PlayButton,
    books: Vec<Book>,
    cards: Vec<BookCard>,
    mode: DisplayMode,
    settings: Arc<SettingsManager>,
    inputs: Sender<ShelfInput>,
    warning_showing: Rc<Cell<bool>>,
}

impl BookShelfPage {
    /// Creates an empty shelf page.
    ///
    /// # Arguments
    ///
    /// * `settings` - Source of the current book id shown by the row indicator
    /// * `inputs` - Queue receiving every user interaction
    ///
    /// # Returns
    ///
    /// A new `BookShelfPage` in grid mode with no books.
    pub fn new(settings: Arc<SettingsManager>, inputs: Sender<ShelfInput>) -> Self {
        let header_bar = ShelfHeaderBar::new(&inputs);

        let flow_box = FlowBox::builder()
            .halign(Fill)
            .valign(Start)
            .homogeneous(true)
            .selection_mode(SelectionNone)
            .row_spacing(8)
            .column_spacing(8)
            .margin_top(12)
            .margin_bottom(12)
            .margin_start(12)
            .margin_end(12)
            .css_classes(["book-grid"])
            .build();
        flow_box.set_accessible_role(Grid);

        let list_box = ListBox::builder()
            .selection_mode(SelectionNone)
            .valign(Start)
            .css_classes(["navigation-sidebar"])
            .build();

        let rescan_button = Button::builder()
            .label("Scan Again")
            .halign(Center)
            .css_classes(["pill", "suggested-action"])
            .build();
        let rescan_inputs = inputs.clone();
        rescan_button.connect_clicked(move |_| {
            let _ = rescan_inputs.try_send(ShelfInput::Rescan);
        });
        let empty_page = StatusPage::builder()
            .icon_name("audio-x-generic-symbolic")
            .title("No Audiobooks")
            .description("Add a folder containing audiobooks in the settings")
            .child(&rescan_button)
            .build();

        let stack = Stack::new();
        stack.add_named(&flow_box, Some(GRID_PAGE));
        stack.add_named(&list_box, Some(LIST_PAGE));
        stack.add_named(&empty_page, Some(EMPTY_PAGE));

        let scrolled = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vexpand(true)
            .hexpand(true)
            .child(&stack)
            .build();

        let play_button = PlayButton::builder().visible(false).build();
        let fab_inputs = inputs.clone();
        play_button.button.connect_clicked(move |_| {
            let _ = fab_inputs.try_send(ShelfInput::PlayPause);
        });

        let spinner = Spinner::builder()
            .halign(Center)
            .valign(Center)
            .width_request(48)
            .height_request(48)
            .visible(false)
            .build();

        let overlay = Overlay::builder().child(&scrolled).build();
        overlay.add_overlay(&play_button.button);
        overlay.add_overlay(&spinner);

        let widget = ToolbarView::builder().content(&overlay).build();
        widget.add_top_bar(&header_bar.widget);

        let page = Self {
            widget,
            header_bar,
            flow_box,
            list_box,
            stack,
            spinner,
            play_button,
            books: Vec::new(),
            cards: Vec::new(),
            mode: DisplayMode::default(),
            settings,
            inputs,
            warning_showing: Rc::new(Cell::new(false)),
        };
        page.update_visible_page();
        page
    }

    /// Current display mode of the rows.
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Play/pause icon currently shown.
    #[must_use]
    pub fn play_icon(&self) -> PlayIcon {
        self.play_button.icon()
    }

    /// Whether the play/pause button is shown.
    #[must_use]
    pub fn is_fab_visible(&self) -> bool {
        self.play_button.button.is_visible()
    }

    /// Whether the loading spinner is shown.
    #[must_use]
    pub fn is_loading_visible(&self) -> bool {
        self.spinner.is_visible()
    }

    fn current_book_id(&self) -> Option<i64> {
        self.settings.get_settings().current_book_id
    }

    fn click_handler(&self) -> CardClickHandler {
        let inputs = self.inputs.clone();
        Rc::new(move |book_id, click| {
            let _ = inputs.try_send(ShelfInput::BookClicked { book_id, click });
        })
    }

    /// Rebuilds every card in the container of the current mode.
    fn render(&mut self) {
        self.flow_box.remove_all();
        self.list_box.remove_all();

        let current_id = self.current_book_id();
        let on_click = self.click_handler();
        self.cards = self
            .books
            .iter()
            .map(|book| BookCard::new(book, self.mode, current_id == Some(book.id), on_click.clone()))
            .collect();

        for card in &self.cards {
            match self.mode {
                DisplayMode::Grid => self.flow_box.append(&card.widget),
                DisplayMode::List => self.list_box.append(&card.widget),
            }
        }
        self.update_visible_page();
    }

    fn update_visible_page(&self) {
        let name = if self.books.is_empty() {
            EMPTY_PAGE
        } else {
            match self.mode {
                DisplayMode::Grid => GRID_PAGE,
                DisplayMode::List => LIST_PAGE,
            }
        };
        self.stack.set_visible_child_name(name);
    }
}

impl ShelfAdapter for BookShelfPage {
    fn new_data_set(&mut self, books: Vec<Book>) {
        self.books = books;
        self.render();
    }

    fn books(&self) -> &[Book] {
        &self.books
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            self.mode = mode;
            self.render();
        }
    }

    fn notify_item_changed(&mut self, position: usize) {
        let current_id = self.current_book_id();
        if let (Some(book), Some(card)) = (self.books.get(position), self.cards.get(position)) {
            card.update(book, current_id == Some(book.id));
        }
    }
}

impl ShelfView for BookShelfPage {
    fn apply_layout(&mut self, layout: ShelfLayout) {
        match layout.manager {
            LayoutManager::Grid { columns } => {
                self.flow_box.set_min_children_per_line(columns);
                self.flow_box.set_max_children_per_line(columns);
            }
            LayoutManager::Linear => {}
        }
        self.list_box.set_show_separators(layout.list_divider);
        self.update_visible_page();
    }

    fn visible_row(&self, book_id: i64) -> Option<VisibleRow> {
        self.cards
            .iter()
            .find(|card| card.book_id() == book_id && card.is_attached())
            .map(|card| VisibleRow {
                indicator_visible: card.indicator_visible(),
            })
    }

    fn set_fab_visible(&mut self, visible: bool) {
        self.play_button.button.set_visible(visible);
    }

    fn set_play_icon(&mut self, icon: PlayIcon, animate: bool) {
        self.play_button.set_icon(icon, animate);
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.spinner.set_visible(visible);
    }

    fn is_no_folder_warning_showing(&self) -> bool {
        self.warning_showing.get()
    }

    fn show_no_folder_warning(&mut self) {
        debug!("Showing no folder warning");
        let dialog = AlertDialog::new(
            Some("No Audiobook Folder"),
            Some("Choose the folder containing your audiobooks in the settings."),
        );
        dialog.add_responses(&[(RESPONSE_LATER, "Later"), (RESPONSE_SETTINGS, "Settings")]);
        dialog.set_response_appearance(RESPONSE_SETTINGS, ResponseAppearance::Suggested);
        dialog.set_default_response(Some(RESPONSE_SETTINGS));
        dialog.set_close_response(RESPONSE_LATER);

        let showing = self.warning_showing.clone();
        let inputs = self.inputs.clone();
        dialog.connect_response(None, move |_, response| {
            showing.set(false);
            if response == RESPONSE_SETTINGS {
                let _ = inputs.try_send(ShelfInput::Menu(MenuAction::Settings));
            }
        });

        self.warning_showing.set(true);
        dialog.present(Some(&self.widget));
    }

    fn show_edit_book(&mut self, book: &Book) {
        debug!("Editing book {}", book.id);
        let entry = Entry::builder()
            .text(book.name.as_str())
            .activates_default(true)
            .build();

        let dialog = AlertDialog::new(Some("Edit Book"), Some(book.root.as_str()));
        dialog.set_extra_child(Some(&entry));
        dialog.add_responses(&[(RESPONSE_CANCEL, "Cancel"), (RESPONSE_RENAME, "Rename")]);
        dialog.set_response_appearance(RESPONSE_RENAME, ResponseAppearance::Suggested);
        dialog.set_default_response(Some(RESPONSE_RENAME));
        dialog.set_close_response(RESPONSE_CANCEL);

        let inputs = self.inputs.clone();
        let book_id = book.id;
        let old_name = book.name.clone();
        dialog.connect_response(Some(RESPONSE_RENAME), move |_, _| {
            let name = entry.text().trim().to_string();
            if !name.is_empty() && name != old_name {
                let _ = inputs.try_send(ShelfInput::RenameBook { book_id, name });
            }
        });

        dialog.present(Some(&self.widget));
    }

    fn invalidate_menu(&mut self) {
        let _ = self.inputs.try_send(ShelfInput::RefreshMenu);
    }
}
