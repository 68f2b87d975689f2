//! Crate-wide error type.
//!
//! Every failure is a precondition or invariant violation reported at the
//! call site; nothing is retried or recovered mid-algorithm. `NotStraight`
//! flags malformed input data rather than a caller bug.

use thiserror::Error;

use crate::points::{Orientation, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no positions given")]
    Empty,
    #[error("named position at {pos} has no names")]
    Unnamed { pos: Position },
    #[error("{pos} is claimed by more than one extracted segment")]
    DuplicateClaim { pos: Position },
    #[error("cannot append {pos} to {orientation} segment starting at {start}")]
    MixedDirection {
        orientation: Orientation,
        start: Position,
        pos: Position,
    },
    #[error("not straight x:{xs:?} y:{ys:?}")]
    NotStraight { xs: Vec<i32>, ys: Vec<i32> },
    #[error("point {pos} lies in a grid corner")]
    CornerPoint { pos: Position },
    #[error("point {pos} is not reachable from any retained track")]
    Uncovered { pos: Position },
    #[error("connected tracks {a} and {b} run along the same axis")]
    SameAxis { a: usize, b: usize },
    #[error("tracks form {components} connected components, expected 1")]
    Disconnected { components: usize },
    #[error("invalid track config: {reason}")]
    InvalidConfig { reason: String },
    #[error("invariant violated: {reason}")]
    Invariant { reason: String },
}

impl Error {
    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::Invariant {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
