//! Grid positions and straight segments.
//!
//! - `Position`: integer grid coordinate, ordered by `(x, y)`.
//! - `NamedPosition`: coordinate plus a non-empty list of wire names.
//! - `StraightSegment`: owned run of positions tagged with an `Orientation`.

use std::collections::BTreeSet;
use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Integer grid coordinate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Real-valued copy for metric computations.
    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A position carrying one or more names.
///
/// Invariant: `names` is never empty. `names[0]` is the canonical name used
/// when junction and corner names are derived.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNamedPosition")]
pub struct NamedPosition {
    pub pos: Position,
    names: Vec<String>,
}

impl NamedPosition {
    pub fn new(pos: Position, names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::Unnamed { pos });
        }
        Ok(Self { pos, names })
    }

    /// Single-name constructor; cannot fail.
    pub fn single(pos: Position, name: impl Into<String>) -> Self {
        Self {
            pos,
            names: vec![name.into()],
        }
    }

    #[inline]
    pub fn first(&self) -> &str {
        &self.names[0]
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[derive(Deserialize)]
struct RawNamedPosition {
    pos: Position,
    names: Vec<String>,
}

impl TryFrom<RawNamedPosition> for NamedPosition {
    type Error = Error;

    fn try_from(raw: RawNamedPosition) -> Result<Self> {
        Self::new(raw.pos, raw.names)
    }
}

impl fmt::Display for NamedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pos, self.names.join(","))
    }
}

/// Anything that sits on the grid.
pub trait Located {
    fn pos(&self) -> Position;

    #[inline]
    fn x(&self) -> i32 {
        self.pos().x
    }

    #[inline]
    fn y(&self) -> i32 {
        self.pos().y
    }
}

impl Located for Position {
    #[inline]
    fn pos(&self) -> Position {
        *self
    }
}

impl Located for NamedPosition {
    #[inline]
    fn pos(&self) -> Position {
        self.pos
    }
}

/// Category of a straight segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// All points share `x`.
    Vertical,
    /// All points share `y`.
    Horizontal,
    /// Single point, no direction yet.
    Stub,
}

impl Orientation {
    pub const fn symbol(self) -> char {
        match self {
            Self::Vertical => '|',
            Self::Horizontal => '-',
            Self::Stub => 'o',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Stub => "stub",
        };
        f.write_str(name)
    }
}

/// Ordered run of positions along one grid axis.
///
/// Invariants
/// - `Stub` holds exactly one point once built by the extractor.
/// - `Vertical` points share `x`; `Horizontal` points share `y`.
/// - Orientation is only reassigned while the segment has at most one point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StraightSegment<P = NamedPosition> {
    orientation: Orientation,
    points: Vec<P>,
}

impl<P: Located> StraightSegment<P> {
    /// Validating constructor.
    pub fn new(orientation: Orientation, points: Vec<P>) -> Result<Self> {
        if orientation == Orientation::Stub && points.len() != 1 {
            return Err(Error::invariant(format!(
                "stub needs exactly one point, got {}",
                points.len()
            )));
        }
        if let Some(first) = points.first().map(Located::pos) {
            let bad = match orientation {
                Orientation::Stub => None,
                Orientation::Vertical => points.iter().map(Located::pos).find(|p| p.x != first.x),
                Orientation::Horizontal => points.iter().map(Located::pos).find(|p| p.y != first.y),
            };
            if let Some(pos) = bad {
                return Err(Error::MixedDirection {
                    orientation,
                    start: first,
                    pos,
                });
            }
        }
        Ok(Self {
            orientation,
            points,
        })
    }

    /// Empty segment that will take the given orientation.
    pub(crate) fn empty(orientation: Orientation) -> Self {
        Self {
            orientation,
            points: Vec::new(),
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn points(&self) -> &[P] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.points.iter()
    }

    /// Reassign the orientation; only legal while the segment has ≤1 point.
    pub fn orient(&mut self, orientation: Orientation) -> Result<()> {
        if self.points.len() > 1 && orientation != self.orientation {
            return Err(Error::invariant(format!(
                "cannot reorient a {} segment of {} points",
                self.orientation,
                self.points.len()
            )));
        }
        self.orientation = orientation;
        Ok(())
    }

    /// Add a point. A stub takes its orientation from the point it is joined
    /// with; a fixed orientation must be respected.
    pub fn append(&mut self, p: P) -> Result<()> {
        let pos = p.pos();
        if let Some(start) = self.points.first().map(Located::pos) {
            let orientation = match self.orientation {
                Orientation::Vertical if pos.x == start.x => Orientation::Vertical,
                Orientation::Horizontal if pos.y == start.y => Orientation::Horizontal,
                Orientation::Stub if pos.x == start.x => Orientation::Vertical,
                Orientation::Stub if pos.y == start.y => Orientation::Horizontal,
                orientation => {
                    return Err(Error::MixedDirection {
                        orientation,
                        start,
                        pos,
                    })
                }
            };
            self.orientation = orientation;
        }
        self.points.push(p);
        Ok(())
    }

    /// Overwrite the point sitting at the same coordinate as `p`.
    /// Returns `false` and leaves the segment untouched if there is none.
    pub fn replace(&mut self, p: P) -> bool {
        let pos = p.pos();
        match self.points.iter_mut().find(|q| q.pos() == pos) {
            Some(slot) => {
                *slot = p;
                true
            }
            None => false,
        }
    }

    /// Whether `pos` lies on the (infinite) line of this segment.
    pub fn along(&self, pos: Position) -> bool {
        let Some(start) = self.points.first().map(Located::pos) else {
            return false;
        };
        if self.points.len() == 1 {
            return pos.x == start.x || pos.y == start.y;
        }
        match self.orientation {
            Orientation::Vertical => pos.x == start.x,
            Orientation::Horizontal => pos.y == start.y,
            Orientation::Stub => false,
        }
    }

    pub fn get_at(&self, pos: Position) -> Option<&P> {
        self.points.iter().find(|p| p.pos() == pos)
    }

    pub fn has_at(&self, pos: Position) -> bool {
        self.get_at(pos).is_some()
    }

    pub fn x_range(&self) -> Option<(i32, i32)> {
        let lo = self.points.iter().map(Located::x).min()?;
        let hi = self.points.iter().map(Located::x).max()?;
        Some((lo, hi))
    }

    pub fn y_range(&self) -> Option<(i32, i32)> {
        let lo = self.points.iter().map(Located::y).min()?;
        let hi = self.points.iter().map(Located::y).max()?;
        Some((lo, hi))
    }

    /// Point on this segment's line that lines up with `pos` on the other axis.
    pub fn extend_to(&self, pos: Position) -> Option<Position> {
        let start = self.points.first()?.pos();
        Some(match self.orientation {
            Orientation::Horizontal => Position::new(pos.x, start.y),
            Orientation::Vertical | Orientation::Stub => Position::new(start.x, pos.y),
        })
    }
}

impl<P: Located + Ord> StraightSegment<P> {
    pub fn sort(&mut self) {
        self.points.sort();
    }
}

impl StraightSegment<NamedPosition> {
    /// Every name on every point, deduplicated.
    pub fn names(&self) -> BTreeSet<&str> {
        self.points
            .iter()
            .flat_map(|np| np.names().iter().map(String::as_str))
            .collect()
    }
}

impl<'a, P> IntoIterator for &'a StraightSegment<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<P: fmt::Display> fmt::Display for StraightSegment<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.orientation.symbol())?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}
