//! The book shelf screen: controller, layout rules and the collaborator
//! traits the controller drives.

pub mod controller;
pub mod input;
pub mod layout;
pub mod surface;

pub use {
    controller::{ClickType, MenuAction, ShelfController, ShelfMenu},
    input::ShelfInput,
    layout::{LayoutManager, ShelfLayout, amount_of_columns},
    surface::{PlayIcon, ShelfAdapter, ShelfView, VisibleRow},
};
