//! Decompose a named point set into straight segments and stitch them.
//!
//! Purpose
//! - Peel the most populated straight run off the remaining points until
//!   none are left, then record every coordinate where a later segment's
//!   line passes through a point already claimed by an earlier one.
//! - Repair two layouts the greedy peel cannot connect by itself: a pair of
//!   segments that never touch (corner) and a set of parallel segments
//!   (spine).
//!
//! Naming
//! - A junction point is named `"{first}_x"` after the first name of the
//!   claimed point it duplicates.
//! - A corner is named `"{a}_to_{b}"` after the closest pair of points, with
//!   `"_x"` appended on the non-spine side.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, trace};

use crate::error::{Error, Result};

use super::longest::{straight_closest, straight_longest};
use super::types::{Located, NamedPosition, Orientation, Position, StraightSegment};

/// Junctions per coordinate: `(claimed_name, synthesized_name)` pairs in
/// insertion order.
pub type Connections = BTreeMap<Position, Vec<(String, String)>>;

/// How junction points land on a newly registered segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Insert {
    /// Extracted segment: claim its points, append junction duplicates.
    Append,
    /// Synthetic spine: claim nothing, overwrite the point at the junction.
    Replace,
}

/// Convert a network of named positions into connected straight segments.
///
/// Returns the junction map and the segments sorted by their point
/// sequences.
pub fn decompose_into_straight_lines(
    positions: &[NamedPosition],
) -> Result<(Connections, Vec<StraightSegment>)> {
    if positions.is_empty() {
        return Err(Error::Empty);
    }

    let mut stitcher = Stitcher::default();
    let mut remaining = positions.to_vec();
    while !remaining.is_empty() {
        let (segment, rest) = straight_longest(remaining)?;
        stitcher.register(segment, Insert::Append)?;
        remaining = rest;
    }
    debug!(
        points = positions.len(),
        segments = stitcher.segments.len(),
        junctions = stitcher.connections.len(),
        "extracted straight segments"
    );

    if stitcher.segments.len() == 1 {
        if !stitcher.connections.is_empty() {
            return Err(Error::invariant("single segment with junctions"));
        }
        return Ok(stitcher.finish());
    }

    if stitcher.segments.len() == 2 && stitcher.connections.is_empty() {
        stitcher.join_corner()?;
    }

    if stitcher.connections.is_empty() {
        stitcher.add_spine()?;
    }

    Ok(stitcher.finish())
}

/// Owns the segments while they are being registered and repaired.
#[derive(Default)]
struct Stitcher {
    /// In registration order.
    segments: Vec<StraightSegment>,
    /// Claimed points with the index of the owning segment, in claim order.
    claims: Vec<(NamedPosition, usize)>,
    claimed: HashSet<Position>,
    connections: Connections,
}

impl Stitcher {
    fn register(&mut self, mut segment: StraightSegment, insert: Insert) -> Result<()> {
        if segment.is_empty() {
            return Err(Error::invariant("cannot register an empty segment"));
        }
        let idx = self.segments.len();
        if insert == Insert::Append {
            for np in segment.iter() {
                if !self.claimed.insert(np.pos) {
                    return Err(Error::DuplicateClaim { pos: np.pos });
                }
                self.claims.push((np.clone(), idx));
            }
        }

        for (claimed, owner) in &self.claims {
            if *owner == idx || !segment.along(claimed.pos) {
                continue;
            }
            let current = claimed.first().to_string();
            let joined = format!("{current}_x");
            let junction = NamedPosition::single(claimed.pos, joined.clone());
            match insert {
                Insert::Append => segment.append(junction)?,
                Insert::Replace => {
                    segment.replace(junction);
                }
            }
            trace!(pos = %claimed.pos, from = %current, to = %joined, "junction");
            self.connections
                .entry(claimed.pos)
                .or_default()
                .push((current, joined));
        }

        segment.sort();
        self.segments.push(segment);
        Ok(())
    }

    /// Two segments that never touch: extend the longer one until it lines
    /// up with the closest point of the other and join them there.
    fn join_corner(&mut self) -> Result<()> {
        let (spine, other) = if self.segments[0].len() < self.segments[1].len() {
            (1, 0)
        } else {
            (0, 1)
        };
        let (a, b) = straight_closest(self.segments[spine].points(), self.segments[other].points())
            .ok_or_else(|| Error::invariant("corner between empty segments"))?;
        let name = format!("{}_to_{}", a.first(), b.first());
        let corner = self.segments[spine]
            .extend_to(b.pos)
            .ok_or_else(|| Error::invariant("corner on an empty segment"))?;
        let joined = format!("{name}_x");
        debug!(pos = %corner, name = %name, "joining corner");

        self.segments[spine].append(NamedPosition::single(corner, name.clone()))?;
        self.segments[spine].sort();
        self.segments[other].append(NamedPosition::single(corner, joined.clone()))?;
        self.segments[other].sort();
        self.connections
            .entry(corner)
            .or_default()
            .push((name, joined));
        Ok(())
    }

    /// Parallel segments that never touch: cross all of them with one
    /// synthetic segment of the opposite orientation.
    fn add_spine(&mut self) -> Result<()> {
        let horizontal = self.count(Orientation::Horizontal);
        let vertical = self.count(Orientation::Vertical);
        let along = match (horizontal > 0, vertical > 0) {
            (true, false) => Orientation::Horizontal,
            (false, true) => Orientation::Vertical,
            (false, false) => return Ok(()),
            (true, true) => {
                return Err(Error::invariant(
                    "disconnected segments of mixed orientation",
                ))
            }
        };
        for segment in &mut self.segments {
            if segment.orientation() == Orientation::Stub {
                segment.orient(along)?;
            }
        }

        // Cross coordinate: the most populated column (or row), larger wins ties.
        let mut tally: BTreeMap<i32, usize> = BTreeMap::new();
        for np in self.segments.iter().flat_map(|s| s.iter()) {
            let key = match along {
                Orientation::Horizontal => np.x(),
                _ => np.y(),
            };
            *tally.entry(key).or_default() += 1;
        }
        let cross = tally
            .iter()
            .map(|(&c, &n)| (n, c))
            .max()
            .map(|(_, c)| c)
            .ok_or_else(|| Error::invariant("spine over empty segments"))?;

        let spine_orientation = match along {
            Orientation::Horizontal => Orientation::Vertical,
            _ => Orientation::Horizontal,
        };
        let mut spine = StraightSegment::empty(spine_orientation);
        for segment in &self.segments {
            let at = match along {
                Orientation::Horizontal => segment.y_range().map(|(y, _)| Position::new(cross, y)),
                _ => segment.x_range().map(|(x, _)| Position::new(x, cross)),
            };
            let rep = at.and_then(|p| segment.get_at(p)).ok_or_else(|| {
                Error::invariant(format!("spine at {cross} misses segment {segment}"))
            })?;
            spine.append(NamedPosition::single(rep.pos, rep.first()))?;
        }
        debug!(
            orientation = %spine_orientation,
            at = cross,
            points = spine.len(),
            "adding spine"
        );
        self.register(spine, Insert::Replace)
    }

    fn count(&self, orientation: Orientation) -> usize {
        self.segments
            .iter()
            .filter(|s| s.orientation() == orientation)
            .count()
    }

    fn finish(mut self) -> (Connections, Vec<StraightSegment>) {
        self.segments.sort_by(|a, b| a.points().cmp(b.points()));
        (self.connections, self.segments)
    }
}
