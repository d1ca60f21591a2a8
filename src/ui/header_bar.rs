//! Header bar of the shelf with the menu actions.
//!
//! This module implements the header bar that provides the "current book"
//! shortcut, the grid/list toggle and access to the settings.

use {
    async_channel::Sender,
    libadwaita::{HeaderBar as LibadwaitaHeaderBar, WindowTitle, gtk::Button, prelude::*},
};

use crate::ui::shelf::{MenuAction, ShelfInput, ShelfMenu};

/// Header bar with the shelf menu entries.
pub struct ShelfHeaderBar {
    /// The underlying Libadwaita header bar widget.
    pub widget: LibadwaitaHeaderBar,
    /// Opens the current book.
    pub current_button: Button,
    /// Toggles grid/list.
    pub layout_button: Button,
    /// Opens the settings.
    pub settings_button: Button,
}

impl ShelfHeaderBar {
    /// Creates the header bar. Button presses are queued on `inputs`.
    pub fn new(inputs: &Sender<ShelfInput>) -> Self {
        let widget = LibadwaitaHeaderBar::builder().build();
        widget.set_title_widget(Some(&WindowTitle::new("Audioshelf", "")));

        let current_button = menu_button(
            "media-playlist-consecutive-symbolic",
            "Current Book",
            MenuAction::Current,
            inputs,
        );
        current_button.set_visible(false);
        widget.pack_start(&current_button);

        let layout_button = menu_button(
            "view-list-symbolic",
            "Change Layout",
            MenuAction::ChangeLayout,
            inputs,
        );
        widget.pack_end(&layout_button);

        let settings_button = menu_button(
            "preferences-system-symbolic",
            "Settings",
            MenuAction::Settings,
            inputs,
        );
        widget.pack_end(&settings_button);

        Self {
            widget,
            current_button,
            layout_button,
            settings_button,
        }
    }

    /// Shows the menu state computed by the controller.
    pub fn apply_menu(&self, menu: &ShelfMenu) {
        self.current_button.set_visible(menu.current_visible);
        self.layout_button.set_icon_name(menu.layout_icon);
    }
}

fn menu_button(
    icon_name: &str,
    tooltip: &str,
    action: MenuAction,
    inputs: &Sender<ShelfInput>,
) -> Button {
    let button = Button::builder()
        .icon_name(icon_name)
        .tooltip_text(tooltip)
        .name(action.name())
        .build();
    let inputs = inputs.clone();
    button.connect_clicked(move |_| {
        let _ = inputs.try_send(ShelfInput::Menu(action));
    });
    button
}
