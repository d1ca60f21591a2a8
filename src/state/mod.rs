//! Shelf state: the display mode value and the presenter that owns what the
//! shelf shows.

pub mod display_mode;
pub mod presenter;

pub use {
    display_mode::DisplayMode,
    presenter::{PlayPauseRequester, ShelfEvent, ShelfPresenter},
};
