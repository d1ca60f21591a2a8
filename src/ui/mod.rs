//! GNOME HIG-compliant user interface built with Libadwaita.
//!
//! The shelf logic lives in [`shelf`] and is independent of GTK; the
//! remaining modules are the Libadwaita widgets that implement its
//! collaborator traits and the application window that wires them up.

pub mod application;
pub mod components;
pub mod header_bar;
pub mod navigation;
pub mod router;
pub mod shelf;
pub mod views;

pub use {
    application::AudioshelfApplication,
    header_bar::ShelfHeaderBar,
    navigation::{Navigator, Route},
    router::NavigationRouter,
    shelf::{ShelfController, ShelfInput},
    views::{BookDetailPage, BookShelfPage, SettingsPage},
};
