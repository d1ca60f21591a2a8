//! Reusable UI components of the shelf.
//!
//! This module provides the book card used for grid and list rows and the
//! floating play/pause button.

pub mod book_card;
pub mod play_button;

pub use {
    book_card::{BookCard, CardClickHandler},
    play_button::{PlayButton, PlayButtonBuilder},
};
