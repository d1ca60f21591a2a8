//! Floating play/pause button of the shelf.
//!
//! Icon changes after the first one fade the button in, standing in for the
//! play/pause morph animation.

use libadwaita::{
    PropertyAnimationTarget, TimedAnimation,
    gtk::{
        AccessibleRole::Button as AccessibleButton,
        Align::End,
        Button,
    },
    prelude::*,
};

use crate::ui::shelf::PlayIcon;

/// Fade duration of an animated icon change in milliseconds.
const FADE_MS: u32 = 180;

/// Builder pattern for configuring `PlayButton` components.
#[derive(Debug, Default)]
pub struct PlayButtonBuilder {
    playing: bool,
    visible: bool,
}

impl PlayButtonBuilder {
    /// Sets the initial playing state.
    #[must_use]
    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }

    /// Sets whether the button starts visible.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Builds the `PlayButton` component.
    #[must_use]
    pub fn build(self) -> PlayButton {
        let button = PlayButton::new(if self.playing {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        });
        button.button.set_visible(self.visible);
        button
    }
}

/// Circular play/pause button overlaid on the shelf.
#[derive(Clone)]
pub struct PlayButton {
    /// The button widget.
    pub button: Button,
    icon: PlayIcon,
}

impl PlayButton {
    /// Creates the button showing `icon`.
    #[must_use]
    pub fn new(icon: PlayIcon) -> Self {
        let button = Button::builder()
            .icon_name(icon.icon_name())
            .halign(End)
            .valign(End)
            .margin_end(18)
            .margin_bottom(18)
            .width_request(56)
            .height_request(56)
            .css_classes(["circular", "suggested-action", "osd"])
            .tooltip_text(tooltip(icon))
            .build();
        button.set_accessible_role(AccessibleButton);

        Self { button, icon }
    }

    /// Creates a `PlayButton` builder for configuration.
    #[must_use]
    pub fn builder() -> PlayButtonBuilder {
        PlayButtonBuilder::default()
    }

    /// Switches the icon, fading the button in when `animate` is set.
    pub fn set_icon(&mut self, icon: PlayIcon, animate: bool) {
        if self.icon == icon {
            return;
        }
        self.icon = icon;
        self.button.set_icon_name(icon.icon_name());
        self.button.set_tooltip_text(Some(tooltip(icon)));

        if animate {
            let target = PropertyAnimationTarget::new(&self.button, "opacity");
            TimedAnimation::new(&self.button, 0.3, 1.0, FADE_MS, target).play();
        }
    }

    /// Icon currently shown.
    #[must_use]
    pub fn icon(&self) -> PlayIcon {
        self.icon
    }
}

fn tooltip(icon: PlayIcon) -> &'static str {
    match icon {
        PlayIcon::Play => "Play",
        PlayIcon::Pause => "Pause",
    }
}

#[cfg(test)]
mod tests {
    use libadwaita::prelude::*;

    use crate::ui::{components::play_button::PlayButton, shelf::PlayIcon};

    #[test]
    #[ignore = "Requires GTK display for UI testing"]
    fn test_play_button_builder() {
        if libadwaita::init().is_err() {
            return;
        }
        let button = PlayButton::builder().playing(true).visible(false).build();

        assert_eq!(button.icon(), PlayIcon::Pause);
        assert!(!button.button.is_visible());
        assert_eq!(
            button.button.icon_name().as_deref(),
            Some("media-playback-pause-symbolic")
        );
    }

    #[test]
    #[ignore = "Requires GTK display for UI testing"]
    fn test_set_icon_is_idempotent() {
        if libadwaita::init().is_err() {
            return;
        }
        let mut button = PlayButton::new(PlayIcon::Play);

        button.set_icon(PlayIcon::Pause, false);
        button.set_icon(PlayIcon::Pause, true);

        assert_eq!(button.icon(), PlayIcon::Pause);
        assert_eq!(button.button.tooltip_text().as_deref(), Some("Pause"));
    }
}
