//! Shelf row for a single audiobook, in grid or list form.
//!
//! A card shows a cover placeholder, the book name, the author, listening
//! progress and a "current book" indicator. Clicks are reported through a
//! callback; a right click or a touch long-press counts as a long click.

use std::rc::Rc;

use libadwaita::{
    gtk::{
        Align::{Center, Start},
        Box as GtkBox, GestureClick, GestureLongPress, Image, Label,
        Orientation::{Horizontal, Vertical},
        ProgressBar,
        pango::EllipsizeMode::End,
    },
    prelude::*,
};

use crate::{library::Book, state::DisplayMode, ui::shelf::ClickType};

/// Cover placeholder size in grid mode.
const GRID_COVER_SIZE: i32 = 128;
/// Cover placeholder size in list mode.
const LIST_COVER_SIZE: i32 = 48;

/// Secondary mouse button.
const BUTTON_SECONDARY: u32 = 3;

/// Callback invoked with the book id and click type.
pub type CardClickHandler = Rc<dyn Fn(i64, ClickType)>;

/// A single row on the shelf.
pub struct BookCard {
    /// Root widget of the card.
    pub widget: GtkBox,
    /// Book name.
    pub name_label: Label,
    /// Author line.
    pub author_label: Label,
    /// Listening progress.
    pub progress: ProgressBar,
    /// "Current book" marker.
    pub indicator: Image,
    book_id: i64,
}

impl BookCard {
    /// Builds a card for `book` in the layout of `mode`.
    ///
    /// # Arguments
    ///
    /// * `book` - Book to show
    /// * `mode` - Grid renders a tall tile, list a wide row
    /// * `is_current` - Whether the current-book indicator is shown
    /// * `on_click` - Receives regular and long clicks
    pub fn new(book: &Book, mode: DisplayMode, is_current: bool, on_click: CardClickHandler) -> Self {
        let (orientation, cover_size) = match mode {
            DisplayMode::Grid => (Vertical, GRID_COVER_SIZE),
            DisplayMode::List => (Horizontal, LIST_COVER_SIZE),
        };

        let cover = Image::from_icon_name("audio-x-generic-symbolic");
        cover.set_pixel_size(cover_size);
        cover.add_css_class("book-cover");

        let name_label = Label::builder()
            .xalign(0.0)
            .ellipsize(End)
            .css_classes(["heading"])
            .build();
        let author_label = Label::builder()
            .xalign(0.0)
            .ellipsize(End)
            .css_classes(["dim-label", "caption"])
            .build();
        let progress = ProgressBar::builder().valign(Center).build();
        let indicator = Image::from_icon_name("media-playback-start-symbolic");
        indicator.set_tooltip_text(Some("Current book"));

        let text = GtkBox::builder()
            .orientation(Vertical)
            .spacing(4)
            .hexpand(true)
            .valign(Center)
            .build();
        text.append(&name_label);
        text.append(&author_label);
        text.append(&progress);

        let widget = GtkBox::builder()
            .orientation(orientation)
            .spacing(12)
            .halign(if mode == DisplayMode::Grid { Center } else { Start })
            .margin_top(6)
            .margin_bottom(6)
            .margin_start(6)
            .margin_end(6)
            .css_classes(["book-card"])
            .build();
        if mode == DisplayMode::Grid {
            widget.set_width_request(GRID_COVER_SIZE);
        }
        widget.append(&cover);
        widget.append(&text);
        widget.append(&indicator);

        let click = GestureClick::new();
        click.set_button(0);
        let book_id = book.id;
        let handler = on_click.clone();
        click.connect_released(move |gesture, _n_press, _x, _y| {
            let click_type = if gesture.current_button() == BUTTON_SECONDARY {
                ClickType::Long
            } else {
                ClickType::Regular
            };
            handler(book_id, click_type);
        });
        widget.add_controller(click);

        let long_press = GestureLongPress::new();
        long_press.set_touch_only(true);
        long_press.connect_pressed(move |_gesture, _x, _y| on_click(book_id, ClickType::Long));
        widget.add_controller(long_press);

        let card = Self {
            widget,
            name_label,
            author_label,
            progress,
            indicator,
            book_id,
        };
        card.update(book, is_current);
        card
    }

    /// Refreshes the card from `book`.
    pub fn update(&self, book: &Book, is_current: bool) {
        self.name_label.set_label(&book.name);
        self.author_label
            .set_label(book.author.as_deref().unwrap_or(""));
        self.author_label.set_visible(book.author.is_some());
        self.progress.set_fraction(book.progress());
        self.indicator.set_visible(is_current);
        self.widget.set_tooltip_text(Some(&book.name));
    }

    /// Id of the book on this card.
    #[must_use]
    pub fn book_id(&self) -> i64 {
        self.book_id
    }

    /// Whether the current-book indicator is shown.
    #[must_use]
    pub fn indicator_visible(&self) -> bool {
        self.indicator.is_visible()
    }

    /// Whether the card sits in a shelf container.
    ///
    /// Cards are never recycled, so an attached card is a live row even
    /// while the shelf page is hidden behind another page.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.widget.parent().is_some()
    }
}
