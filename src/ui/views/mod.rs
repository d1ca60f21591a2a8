//! Pages of the application: the shelf, the book detail page and the
//! settings page.

pub mod book_detail;
pub mod book_shelf;
pub mod settings_page;

pub use {book_detail::BookDetailPage, book_shelf::BookShelfPage, settings_page::SettingsPage};
