//! Tracks: minimal sets of grid lines covering a point set.
//!
//! Purpose
//! - Pick a small set of columns and rows that reach every point
//!   (`decompose_points_into_tracks`), bound them to the point extent and
//!   wire them through a hub (`make_tracks`).
//! - Answer connectivity and pin-side queries over the result (`Tracks`),
//!   and hand `(low, high, index)` tuples to a channel packer.
//!
//! Notes
//! - Columns become Y-axis tracks, rows become X-axis tracks.
//! - A pin at `(x, y)` reaches the column at `x` and the one to its left,
//!   and the row at `y` and the one below. Right-only grids drop the left
//!   column and use rows only as cross-bars.

mod build;
mod cfg;
mod index;
mod minimize;

pub use build::{make_tracks, Axis, Track};
pub use cfg::TrackCfg;
pub use index::{Direction, Tracks};
pub use minimize::{decompose_points_into_tracks, Pool, TrackMinimizer};

#[cfg(test)]
mod tests;
