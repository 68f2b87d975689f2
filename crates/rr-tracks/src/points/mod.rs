//! Named grid points and their decomposition into straight segments.
//!
//! Purpose
//! - Model grid coordinates (`Position`, `NamedPosition`) and direction-tagged
//!   straight runs (`StraightSegment`).
//! - Reduce a connected point set to straight segments joined at explicit,
//!   named junctions (`decompose_into_straight_lines`).
//!
//! Notes
//! - The peel is greedy: each round takes the most populated line. Ties go to
//!   horizontal lines and to larger coordinates; segment shapes and
//!   synthesized names depend on this order, so it is part of the contract.

mod decompose;
mod longest;
mod types;

pub use decompose::{decompose_into_straight_lines, Connections};
pub use longest::{distance, straight_closest, straight_ends, straight_longest};
pub use types::{Located, NamedPosition, Orientation, Position, StraightSegment};
