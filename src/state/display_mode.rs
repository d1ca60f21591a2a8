//! Grid/list display mode for the book shelf.

use serde::{Deserialize, Serialize};

/// How the shelf lays out its books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Cover grid (default).
    #[default]
    Grid,
    /// Single-column list with dividers.
    List,
}

impl DisplayMode {
    /// Returns the other display mode.
    #[must_use]
    pub fn inverted(self) -> Self {
        match self {
            DisplayMode::Grid => DisplayMode::List,
            DisplayMode::List => DisplayMode::Grid,
        }
    }

    /// Symbolic icon representing this mode.
    ///
    /// The layout toggle shows the icon of the mode it switches *to*, so
    /// callers usually ask the inverted mode for its icon.
    #[must_use]
    pub fn icon_name(self) -> &'static str {
        match self {
            DisplayMode::Grid => "view-grid-symbolic",
            DisplayMode::List => "view-list-symbolic",
        }
    }
}
