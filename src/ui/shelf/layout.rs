//! Layout configuration derived from the display mode.

use crate::{config::DEFAULT_COVER_WIDTH, state::DisplayMode};

/// Minimum number of grid columns.
pub const MIN_COLUMNS: u32 = 2;

/// How rows are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutManager {
    /// Covers in a fixed number of columns.
    Grid { columns: u32 },
    /// One book per row.
    Linear,
}

/// Complete layout of the shelf: the layout manager plus whether the list
/// divider decoration is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfLayout {
    pub manager: LayoutManager,
    pub list_divider: bool,
}

impl ShelfLayout {
    /// Layout for a display mode. Only the list carries dividers.
    #[must_use]
    pub fn for_mode(mode: DisplayMode, columns: u32) -> Self {
        match mode {
            DisplayMode::Grid => Self {
                manager: LayoutManager::Grid { columns },
                list_divider: false,
            },
            DisplayMode::List => Self {
                manager: LayoutManager::Linear,
                list_divider: true,
            },
        }
    }
}

/// Number of grid columns for an available width.
///
/// Rounds `width / desired` to the nearest integer and never returns fewer
/// than [`MIN_COLUMNS`]. A desired width of zero falls back to the default.
#[must_use]
pub fn amount_of_columns(width_px: u32, desired_cover_px: u32) -> u32 {
    let desired = if desired_cover_px == 0 {
        DEFAULT_COVER_WIDTH
    } else {
        desired_cover_px
    };
    let columns = (f64::from(width_px) / f64::from(desired)).round() as u32;
    columns.max(MIN_COLUMNS)
}

#[cfg(test)]
mod tests {
    use crate::{
        state::DisplayMode::{Grid, List},
        ui::shelf::layout::{LayoutManager, ShelfLayout, amount_of_columns},
    };

    #[test]
    fn test_columns_round_to_nearest() {
        assert_eq!(amount_of_columns(1000, 200), 5);
        assert_eq!(amount_of_columns(1100, 200), 6);
        assert_eq!(amount_of_columns(1090, 200), 5);
    }

    #[test]
    fn test_columns_never_below_two() {
        assert_eq!(amount_of_columns(0, 200), 2);
        assert_eq!(amount_of_columns(300, 200), 2);
    }

    #[test]
    fn test_zero_desired_width_uses_default() {
        assert_eq!(amount_of_columns(1000, 0), 5);
    }

    #[test]
    fn test_only_list_has_divider() {
        assert_eq!(
            ShelfLayout::for_mode(Grid, 3),
            ShelfLayout {
                manager: LayoutManager::Grid { columns: 3 },
                list_divider: false,
            }
        );
        assert_eq!(
            ShelfLayout::for_mode(List, 3),
            ShelfLayout {
                manager: LayoutManager::Linear,
                list_divider: true,
            }
        );
    }
}
