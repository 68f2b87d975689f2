//! Routing-resource geometry: straight segments and tracks over grid points.
//!
//! Two independent pipelines start from the same kind of input, a set of
//! grid points that must all end up electrically connected:
//! - `points`: named positions → straight segments joined at named junctions.
//! - `tracks`: raw positions → retained columns/rows → bounded tracks with
//!   hub connections and pin-side lookup.
//!
//! API Policy
//! - Everything runs synchronously on owned or borrowed inputs. The only
//!   mutable state is the per-coordinate cache inside `tracks::Tracks`.
//! - Failures are returned as `Error`; library code does not panic on bad
//!   input.

pub mod error;
pub mod points;
pub mod tracks;

pub use error::{Error, Result};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::points::{
        decompose_into_straight_lines, straight_longest, Connections, Located, NamedPosition,
        Orientation, Position, StraightSegment,
    };
    pub use crate::tracks::{
        decompose_points_into_tracks, make_tracks, Axis, Direction, Track, TrackCfg, Tracks,
    };
}
