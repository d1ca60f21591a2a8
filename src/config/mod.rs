//! User preferences, settings, and persistent state management.
//!
//! This module provides user preference management with XDG Base Directory
//! compliance and the narrow preference interface used by the shelf.

pub mod preferences;
pub mod settings;

pub use {
    preferences::ShelfPreferences,
    settings::{
        DEFAULT_COVER_WIDTH, SettingsError, SettingsEvent, SettingsManager, UserSettings,
        get_config_path, get_data_dir,
    },
};
