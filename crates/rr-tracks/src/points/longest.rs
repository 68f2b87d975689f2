//! Longest straight run extraction and small straight-line helpers.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

use super::types::{Located, Orientation, Position, StraightSegment};

/// Split off the straight run that covers the most points.
///
/// The x and y coordinates are tallied; on each axis the best entry is the
/// largest `(count, coordinate)`, so equal counts prefer the larger
/// coordinate. A vertical run wins only with a strictly larger count than
/// the best horizontal run. Both halves keep input order; a run of one point
/// comes back as a `Stub`.
///
/// Returns `(segment, remainder)`.
pub fn straight_longest<P: Located>(positions: Vec<P>) -> Result<(StraightSegment<P>, Vec<P>)> {
    let (x_best, y_best) = tally_best(&positions).ok_or(Error::Empty)?;

    let vertical = x_best.0 > y_best.0;
    let on_line = |p: &P| {
        if vertical {
            p.x() == x_best.1
        } else {
            p.y() == y_best.1
        }
    };

    let (line, rest): (Vec<P>, Vec<P>) = positions.into_iter().partition(on_line);
    let orientation = match (line.len(), vertical) {
        (1, _) => Orientation::Stub,
        (_, true) => Orientation::Vertical,
        (_, false) => Orientation::Horizontal,
    };
    Ok((StraightSegment::new(orientation, line)?, rest))
}

/// Best `(count, coordinate)` per axis, `None` for empty input.
fn tally_best<P: Located>(positions: &[P]) -> Option<((usize, i32), (usize, i32))> {
    let mut xs: BTreeMap<i32, usize> = BTreeMap::new();
    let mut ys: BTreeMap<i32, usize> = BTreeMap::new();
    for p in positions {
        *xs.entry(p.x()).or_default() += 1;
        *ys.entry(p.y()).or_default() += 1;
    }
    let best = |tally: &BTreeMap<i32, usize>| tally.iter().map(|(&c, &n)| (n, c)).max();
    Some((best(&xs)?, best(&ys)?))
}

/// Start and end of a straight run: `(min_x, min_y)` and `(max_x, max_y)`.
///
/// Points may repeat or leave gaps; they only have to agree on one axis.
pub fn straight_ends<P: Located>(positions: &[P]) -> Result<(Position, Position)> {
    let xs: BTreeSet<i32> = positions.iter().map(Located::x).collect();
    let ys: BTreeSet<i32> = positions.iter().map(Located::y).collect();

    if xs.len() > 1 && ys.len() > 1 {
        return Err(Error::NotStraight {
            xs: xs.into_iter().collect(),
            ys: ys.into_iter().collect(),
        });
    }
    let (Some(&x0), Some(&y0)) = (xs.first(), ys.first()) else {
        return Err(Error::Empty);
    };
    let (Some(&x1), Some(&y1)) = (xs.last(), ys.last()) else {
        return Err(Error::Empty);
    };
    Ok((Position::new(x0, y0), Position::new(x1, y1)))
}

/// Euclidean distance between two grid positions.
#[inline]
pub fn distance(a: Position, b: Position) -> f64 {
    (b.to_vector() - a.to_vector()).norm()
}

/// Closest pair `(a ∈ line1, b ∈ line2)`; the first pair found wins ties.
pub fn straight_closest<'a, P: Located>(line1: &'a [P], line2: &'a [P]) -> Option<(&'a P, &'a P)> {
    let mut best: Option<(f64, &P, &P)> = None;
    for p1 in line1 {
        for p2 in line2 {
            let d = distance(p1.pos(), p2.pos());
            if best.map_or(true, |(min_d, _, _)| d < min_d) {
                best = Some((d, p1, p2));
            }
        }
    }
    best.map(|(_, a, b)| (a, b))
}
