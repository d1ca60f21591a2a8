//! User preference management with XDG Base Directory compliance.
//!
//! This module provides user settings management with proper XDG directory
//! usage for config and data files, and fans out change notifications to
//! subscribers such as the shelf presenter.

use std::{
    env::var,
    fs::{create_dir_all, read_to_string, write},
    io::Error as StdError,
    path::PathBuf,
};

use {
    async_channel::{Receiver, Sender, unbounded},
    parking_lot::{RwLock, RwLockReadGuard},
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str, to_string_pretty},
    thiserror::Error,
    tracing::debug,
};

use crate::state::DisplayMode;

/// Default desired cover width in pixels used to derive grid columns.
pub const DEFAULT_COVER_WIDTH: u32 = 200;

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Serializable user settings structure with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Grid or list layout of the shelf.
    pub display_mode: DisplayMode,
    /// Book last loaded into the player.
    pub current_book_id: Option<i64>,
    /// Folders scanned for audiobooks.
    pub audiobook_directories: Vec<String>,
    /// Desired cover width in pixels for the grid layout.
    pub desired_cover_width: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Grid,
            current_book_id: None,
            audiobook_directories: vec![],
            desired_cover_width: DEFAULT_COVER_WIDTH,
        }
    }
}

/// Settings change notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    /// The shelf display mode changed.
    DisplayModeChanged(DisplayMode),
    /// The persisted current book changed.
    CurrentBookChanged(Option<i64>),
    /// The configured audiobook folders changed.
    DirectoriesChanged(Vec<String>),
    /// The desired grid cover width changed.
    CoverWidthChanged(u32),
}

/// Handles loading, saving, and validation of user preferences.
#[derive(Debug)]
pub struct SettingsManager {
    /// Thread-safe user settings storage.
    settings: RwLock<UserSettings>,
    /// Path to the configuration file on disk.
    config_path: PathBuf,
    /// Active subscribers for manual broadcast fan-out.
    subscribers: RwLock<Vec<Sender<SettingsEvent>>>,
}

impl SettingsManager {
    /// Creates a new settings manager with default config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn new() -> Result<Self, SettingsError> {
        Self::with_config_path(get_config_path())
    }

    /// Creates a new settings manager with a custom config path (for testing).
    ///
    /// # Arguments
    ///
    /// * `config_path` - Custom path for the settings file
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file exists but cannot be read or parsed,
    /// or if its values are out of range.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        if let Some(parent) = config_path.parent() {
            create_dir_all(parent)?;
        }

        let settings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            from_str(&contents)?
        } else {
            debug!("Using default settings, file not found: {:?}", config_path);
            UserSettings::default()
        };
        validate(&settings)?;

        Ok(SettingsManager {
            settings: RwLock::new(settings),
            config_path,
            subscribers: RwLock::new(Vec::new()),
        })
    }

    /// Gets the current settings.
    pub fn get_settings(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.settings.read()
    }

    /// Updates the settings, saves them to disk and notifies subscribers.
    ///
    /// The in-memory settings change even when saving fails, so the running
    /// session keeps the user's choice.
    ///
    /// # Arguments
    ///
    /// * `new_settings` - New settings to apply.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for out-of-range values (nothing is
    /// applied), or an IO/serialization error if the file cannot be written.
    pub fn update_settings(&self, new_settings: UserSettings) -> Result<(), SettingsError> {
        validate(&new_settings)?;

        let events = {
            let mut settings_write = self.settings.write();
            let events = diff(&settings_write, &new_settings);
            *settings_write = new_settings;
            events
        };

        let saved = self.save_settings();
        for event in &events {
            self.broadcast_event(event);
        }
        saved
    }

    /// Applies a change to a copy of the current settings and stores it.
    ///
    /// # Errors
    ///
    /// Same as [`SettingsManager::update_settings`].
    pub fn modify<F>(&self, change: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut UserSettings),
    {
        let mut settings = self.get_settings().clone();
        change(&mut settings);
        self.update_settings(settings)
    }

    /// Subscribes to settings changes.
    pub fn subscribe(&self) -> Receiver<SettingsEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.write().push(tx);
        rx
    }

    /// Sends an event to every live subscriber, dropping closed channels.
    fn broadcast_event(&self, event: &SettingsEvent) -> usize {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.try_send(event.clone()).is_ok());
        subscribers.len()
    }

    /// Saves the current settings to disk.
    fn save_settings(&self) -> Result<(), SettingsError> {
        debug!("Saving settings to file: {:?}", self.config_path);
        let contents = to_string_pretty(&*self.settings.read())?;
        write(&self.config_path, contents)?;
        Ok(())
    }
}

fn validate(settings: &UserSettings) -> Result<(), SettingsError> {
    if settings.desired_cover_width > 4096 {
        return Err(SettingsError::InvalidValue {
            reason: format!(
                "desired cover width {} exceeds 4096 pixels",
                settings.desired_cover_width
            ),
        });
    }
    Ok(())
}

fn diff(old: &UserSettings, new: &UserSettings) -> Vec<SettingsEvent> {
    let mut events = Vec::new();
    if old.display_mode != new.display_mode {
        events.push(SettingsEvent::DisplayModeChanged(new.display_mode));
    }
    if old.current_book_id != new.current_book_id {
        events.push(SettingsEvent::CurrentBookChanged(new.current_book_id));
    }
    if old.audiobook_directories != new.audiobook_directories {
        events.push(SettingsEvent::DirectoriesChanged(
            new.audiobook_directories.clone(),
        ));
    }
    if old.desired_cover_width != new.desired_cover_width {
        events.push(SettingsEvent::CoverWidthChanged(new.desired_cover_width));
    }
    events
}

/// Path of the settings file inside the XDG config directory.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = xdg_home("XDG_CONFIG_HOME", ".config");
    config_dir.push("audioshelf");
    config_dir.push("settings.json");
    config_dir
}

/// Directory holding the book database inside the XDG data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    let mut data_dir = xdg_home("XDG_DATA_HOME", ".local/share");
    data_dir.push("audioshelf");
    data_dir
}

/// Resolves an XDG base directory, falling back to `$HOME/<fallback>`.
fn xdg_home(env_key: &str, fallback: &str) -> PathBuf {
    if let Ok(dir) = var(env_key)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(fallback);
        return path;
    }

    PathBuf::from(".")
}
