//! Detail page of a single book.
//!
//! Shows name, author, root folder and listening progress of the book that
//! was opened from the shelf, with a play/pause button for the player.

use std::sync::Arc;

use libadwaita::{
    HeaderBar, NavigationPage, ToolbarView,
    gtk::{
        Align::{Center, Fill},
        Box as GtkBox, Button, Image, Justification, Label,
        Orientation::Vertical,
        ProgressBar,
        pango::EllipsizeMode::Middle,
    },
    prelude::*,
};

use crate::{
    library::Book,
    state::{PlayPauseRequester, ShelfPresenter},
    ui::shelf::PlayIcon,
};

/// Navigation page tag of the detail page.
pub const DETAIL_TAG: &str = "book-detail";

/// Formats a duration in milliseconds as `m:ss` or `h:mm:ss`.
#[must_use]
pub fn format_duration_ms(duration_ms: i64) -> String {
    let total_seconds = duration_ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Detail page for one book.
pub struct BookDetailPage {
    /// The navigation page pushed onto the navigation view.
    pub widget: NavigationPage,
    /// Play/pause button.
    pub play_button: Button,
}

impl BookDetailPage {
    /// Builds the page for `book`.
    ///
    /// # Arguments
    ///
    /// * `book` - Book to show
    /// * `presenter` - Receives play/pause presses and reports the player state
    ///
    /// # Returns
    ///
    /// A new `BookDetailPage`.
    pub fn new(book: &Book, presenter: Arc<ShelfPresenter>) -> Self {
        let cover = Image::from_icon_name("audio-x-generic-symbolic");
        cover.set_pixel_size(192);

        let name_label = Label::builder()
            .label(book.name.as_str())
            .wrap(true)
            .justify(Justification::Center)
            .css_classes(["title-1"])
            .build();
        let author_label = Label::builder()
            .label(book.author.as_deref().unwrap_or("Unknown Author"))
            .css_classes(["title-4", "dim-label"])
            .build();
        let root_label = Label::builder()
            .label(book.root.as_str())
            .ellipsize(Middle)
            .css_classes(["caption", "dim-label"])
            .build();

        let progress = ProgressBar::builder()
            .fraction(book.progress())
            .show_text(true)
            .text(format!(
                "{} / {}",
                format_duration_ms(book.position_ms),
                format_duration_ms(book.duration_ms)
            ))
            .build();

        let icon = if presenter.is_playing() {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        };
        let play_button = Button::builder()
            .icon_name(icon.icon_name())
            .halign(Center)
            .width_request(64)
            .height_request(64)
            .css_classes(["circular", "suggested-action"])
            .build();
        play_button.connect_clicked(move |button| {
            presenter.play_pause_requested();
            let icon = if presenter.is_playing() {
                PlayIcon::Pause
            } else {
                PlayIcon::Play
            };
            button.set_icon_name(icon.icon_name());
        });

        let content = GtkBox::builder()
            .orientation(Vertical)
            .spacing(12)
            .halign(Fill)
            .valign(Center)
            .margin_start(24)
            .margin_end(24)
            .margin_top(24)
            .margin_bottom(24)
            .build();
        content.append(&cover);
        content.append(&name_label);
        content.append(&author_label);
        content.append(&root_label);
        content.append(&progress);
        content.append(&play_button);

        let toolbar = ToolbarView::builder().content(&content).build();
        toolbar.add_top_bar(&HeaderBar::new());

        let widget = NavigationPage::builder()
            .title(book.name.as_str())
            .tag(DETAIL_TAG)
            .child(&toolbar)
            .build();

        Self {
            widget,
            play_button,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ui::views::book_detail::format_duration_ms;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(0), "0:00");
        assert_eq!(format_duration_ms(61_500), "1:01");
        assert_eq!(format_duration_ms(3_723_000), "1:02:03");
        assert_eq!(format_duration_ms(-5), "0:00");
    }
}
