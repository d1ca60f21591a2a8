//! Settings page reached from the shelf menu.
//!
//! Manages the audiobook folders and the desired cover width. Every change
//! goes through the `SettingsManager`, whose change events drive rescans
//! and the no-folder warning.

use std::sync::Arc;

use {
    libadwaita::{
        ActionRow, HeaderBar, NavigationPage, PreferencesGroup, PreferencesPage, SpinRow,
        ToolbarView,
        glib::MainContext,
        gtk::{
            AccessibleRole::Group, Adjustment, Align::Center, Button, FileDialog, ListBox,
            SelectionMode::None as SelectionNone, Window,
        },
        prelude::*,
    },
    tracing::{debug, error, info},
};

use crate::config::{DEFAULT_COVER_WIDTH, SettingsManager};

/// Navigation page tag of the settings page.
pub const SETTINGS_TAG: &str = "settings";

/// Smallest and largest cover width offered.
const MIN_COVER_WIDTH: f64 = 64.0;
const MAX_COVER_WIDTH: f64 = 512.0;

/// Settings page with folder management.
pub struct SettingsPage {
    /// The navigation page pushed onto the navigation view.
    pub widget: NavigationPage,
    /// One row per configured folder.
    pub folder_list: ListBox,
}

impl SettingsPage {
    /// Creates the settings page.
    ///
    /// # Arguments
    ///
    /// * `settings` - Settings manager reference for persistence
    ///
    /// # Returns
    ///
    /// A new `SettingsPage` instance.
    pub fn new(settings: Arc<SettingsManager>) -> Self {
        let preferences = PreferencesPage::builder()
            .title("Settings")
            .icon_name("preferences-system-symbolic")
            .accessible_role(Group)
            .build();

        let folder_list = ListBox::builder()
            .selection_mode(SelectionNone)
            .css_classes(["boxed-list"])
            .build();

        let folders = PreferencesGroup::builder()
            .title("Audiobook Folders")
            .description("Every folder inside these folders becomes a book")
            .build();
        let add_button = Button::builder()
            .icon_name("list-add-symbolic")
            .tooltip_text("Add Folder")
            .valign(Center)
            .css_classes(["flat"])
            .build();
        {
            let settings = settings.clone();
            let folder_list = folder_list.clone();
            add_button.connect_clicked(move |button| {
                let parent = button.root().and_downcast::<Window>();
                show_add_folder_dialog(settings.clone(), folder_list.clone(), parent);
            });
        }
        folders.set_header_suffix(Some(&add_button));
        folders.add(&folder_list);
        preferences.add(&folders);

        preferences.add(&appearance_group(&settings));

        let toolbar = ToolbarView::builder().content(&preferences).build();
        toolbar.add_top_bar(&HeaderBar::new());
        let widget = NavigationPage::builder()
            .title("Settings")
            .tag(SETTINGS_TAG)
            .child(&toolbar)
            .build();

        refresh_folder_list(&settings, &folder_list);
        debug!("SettingsPage: Created");

        Self {
            widget,
            folder_list,
        }
    }
}

fn appearance_group(settings: &Arc<SettingsManager>) -> PreferencesGroup {
    let group = PreferencesGroup::builder().title("Appearance").build();

    let adjustment = Adjustment::new(
        f64::from(settings.get_settings().desired_cover_width),
        MIN_COVER_WIDTH,
        MAX_COVER_WIDTH,
        8.0,
        32.0,
        0.0,
    );
    let spin_row = SpinRow::builder()
        .title("Cover Width")
        .subtitle(format!("Grid column width in pixels (default {})", DEFAULT_COVER_WIDTH))
        .adjustment(&adjustment)
        .numeric(true)
        .build();

    let settings = settings.clone();
    spin_row.connect_value_notify(move |row| {
        let width = row.value() as u32;
        if let Err(e) = settings.modify(|s| s.desired_cover_width = width) {
            error!("Failed to update cover width: {}", e);
        }
    });

    group.add(&spin_row);
    group
}

fn show_add_folder_dialog(settings: Arc<SettingsManager>, folder_list: ListBox, parent: Option<Window>) {
    let dialog = FileDialog::builder()
        .title("Select Audiobook Folder")
        .accept_label("Add Folder")
        .modal(true)
        .build();

    MainContext::default().spawn_local(async move {
        let folder = match dialog.select_folder_future(parent.as_ref()).await {
            Ok(folder) => folder,
            Err(e) => {
                debug!("Folder selection cancelled or failed: {}", e);
                return;
            }
        };
        let Some(path) = folder.path() else {
            return;
        };
        let path = path.to_string_lossy().into_owned();

        let result = settings.modify(|s| {
            if !s.audiobook_directories.contains(&path) {
                s.audiobook_directories.push(path.clone());
            }
        });
        match result {
            Ok(()) => info!("Audiobook folder added: {}", path),
            Err(e) => error!("Failed to add audiobook folder: {}", e),
        }
        refresh_folder_list(&settings, &folder_list);
    });
}

fn refresh_folder_list(settings: &Arc<SettingsManager>, folder_list: &ListBox) {
    folder_list.remove_all();

    let directories = settings.get_settings().audiobook_directories.clone();
    if directories.is_empty() {
        let row = ActionRow::builder()
            .title("No folder configured")
            .css_classes(["dim-label"])
            .build();
        folder_list.append(&row);
        return;
    }

    for directory in directories {
        let row = ActionRow::builder().title(directory.as_str()).build();
        let remove_button = Button::builder()
            .icon_name("edit-delete-symbolic")
            .tooltip_text("Remove Folder")
            .valign(Center)
            .css_classes(["flat"])
            .build();

        let settings = settings.clone();
        let list = folder_list.clone();
        remove_button.connect_clicked(move |_| {
            debug!("Removing audiobook folder: {}", directory);
            if let Err(e) = settings.modify(|s| s.audiobook_directories.retain(|d| d != &directory)) {
                error!("Failed to remove audiobook folder: {}", e);
                return;
            }
            refresh_folder_list(&settings, &list);
        });

        row.add_suffix(&remove_button);
        folder_list.append(&row);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::{config::SettingsManager, ui::views::settings_page::SettingsPage};

    #[test]
    #[ignore = "Requires GTK display for UI testing"]
    fn test_settings_page_lists_folders() {
        if libadwaita::init().is_err() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let settings =
            Arc::new(SettingsManager::with_config_path(temp_dir.path().join("settings.json")).unwrap());
        settings
            .modify(|s| s.audiobook_directories = vec!["/a".to_string(), "/b".to_string()])
            .unwrap();

        let page = SettingsPage::new(settings);

        assert!(page.folder_list.row_at_index(1).is_some());
        assert!(page.folder_list.row_at_index(2).is_none());
    }
}
