//! Grid bounds and pin-side policy shared by the minimizer and the builder.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::points::Position;

/// Track configuration.
///
/// Unbounded grids have no upper exclusion zone; a bounded grid forbids its
/// four corner cells and clips tracks to `[1, size - 2]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCfg {
    pub grid_width: Option<i32>,
    pub grid_height: Option<i32>,
    /// Pins are reachable from the right only; rows act as cross-bars.
    pub right_only: bool,
}

impl TrackCfg {
    pub fn bounded(width: i32, height: i32) -> Self {
        Self {
            grid_width: Some(width),
            grid_height: Some(height),
            right_only: false,
        }
    }

    pub fn with_right_only(mut self) -> Self {
        self.right_only = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        match (self.grid_width, self.grid_height) {
            (None, None) => Ok(()),
            (Some(w), Some(h)) if w >= 2 && h >= 2 => Ok(()),
            (Some(w), Some(h)) => Err(Error::invalid_config(format!(
                "grid {w}x{h} is smaller than 2x2"
            ))),
            (Some(_), None) => Err(Error::invalid_config("grid width without height")),
            (None, Some(_)) => Err(Error::invalid_config("grid height without width")),
        }
    }

    /// Whether a column can reach `p` (`p.y` is strictly inside the grid).
    pub(crate) fn reaches_column(&self, p: Position) -> bool {
        p.y > 0 && self.grid_height.map_or(true, |h| p.y < h - 2)
    }

    /// Whether a row can reach `p`.
    pub(crate) fn reaches_row(&self, p: Position) -> bool {
        p.x > 0 && self.grid_width.map_or(true, |w| p.x < w - 2)
    }

    pub(crate) fn is_corner(&self, p: Position) -> bool {
        if p.x == 0 && p.y == 0 {
            return true;
        }
        match (self.grid_width, self.grid_height) {
            (Some(w), Some(h)) => {
                let right = p.x == w - 1;
                let top = p.y == h - 1;
                (right && p.y == 0) || (p.x == 0 && top) || (right && top)
            }
            _ => false,
        }
    }

    /// Last usable column (`None` when unbounded).
    pub(crate) fn max_column(&self) -> Option<i32> {
        self.grid_width.map(|w| w - 2)
    }

    pub(crate) fn max_row(&self) -> Option<i32> {
        self.grid_height.map(|h| h - 2)
    }
}
