//! Bounded tracks from retained lines, wired through a hub.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::points::Position;

use super::cfg::TrackCfg;

/// Axis a track runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Runs along `x` at a fixed `y` (built from a retained row).
    X,
    /// Runs along `y` at a fixed `x` (built from a retained column).
    Y,
}

/// Bounded straight wire. The fixed coordinate has `low == high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub axis: Axis,
    pub x_low: i32,
    pub x_high: i32,
    pub y_low: i32,
    pub y_high: i32,
}

impl Track {
    /// `(low, high)` along the running axis.
    #[inline]
    pub fn span(&self) -> (i32, i32) {
        match self.axis {
            Axis::X => (self.x_low, self.x_high),
            Axis::Y => (self.y_low, self.y_high),
        }
    }

    /// The coordinate that does not vary along the track.
    #[inline]
    pub fn fixed(&self) -> i32 {
        match self.axis {
            Axis::X => self.y_low,
            Axis::Y => self.x_low,
        }
    }
}

/// Build one track per retained column (`xs`, Y-axis tracks first) and row
/// (`ys`, X-axis tracks), spanning the extent of `points`.
///
/// Connections join every X track to the first Y track and every Y track to
/// the first X track; pairs are `(x_track, y_track)`, sorted and unique.
pub fn make_tracks(
    xs: &[i32],
    ys: &[i32],
    points: &[Position],
    cfg: TrackCfg,
) -> Result<(Vec<Track>, Vec<(usize, usize)>)> {
    cfg.validate()?;
    let columns: HashSet<i32> = xs.iter().copied().collect();
    let rows: HashSet<i32> = ys.iter().copied().collect();
    let near = |lines: &HashSet<i32>, c: i32| {
        lines.contains(&c) || (c > 0 && lines.contains(&(c - 1)))
    };
    for &p in points {
        if !near(&columns, p.x) && !near(&rows, p.y) {
            return Err(Error::Uncovered { pos: p });
        }
    }

    let (Some(min_x), Some(max_x)) = (
        points.iter().map(|p| p.x).min(),
        points.iter().map(|p| p.x).max(),
    ) else {
        return Err(Error::Empty);
    };
    let (Some(min_y), Some(max_y)) = (
        points.iter().map(|p| p.y).min(),
        points.iter().map(|p| p.y).max(),
    ) else {
        return Err(Error::Empty);
    };
    let extent = |lo: i32, hi: i32, bound: Option<i32>| -> Result<(i32, i32)> {
        let lo = lo.max(1);
        let hi = bound.map_or(hi, |b| hi.min(b));
        if lo > hi {
            return Err(Error::invariant(format!("empty track extent [{lo}, {hi}]")));
        }
        Ok((lo, hi))
    };

    let mut tracks = Vec::with_capacity(xs.len() + ys.len());
    if !xs.is_empty() {
        let (y_low, y_high) = extent(min_y, max_y, cfg.max_row())?;
        tracks.extend(xs.iter().map(|&x| Track {
            axis: Axis::Y,
            x_low: x,
            x_high: x,
            y_low,
            y_high,
        }));
    }
    if !ys.is_empty() {
        let (x_low, x_high) = extent(min_x, max_x, cfg.max_column())?;
        tracks.extend(ys.iter().map(|&y| Track {
            axis: Axis::X,
            x_low,
            x_high,
            y_low: y,
            y_high: y,
        }));
    }

    if tracks.len() <= 1 {
        return Ok((tracks, Vec::new()));
    }
    if xs.is_empty() || ys.is_empty() {
        return Err(Error::invariant(format!(
            "{} tracks but columns={} rows={}",
            tracks.len(),
            xs.len(),
            ys.len()
        )));
    }

    // Hubs: first Y track and first X track.
    let y_hub = 0;
    let x_hub = xs.len();
    let mut connections = BTreeSet::new();
    for (idx, track) in tracks.iter().enumerate() {
        match track.axis {
            Axis::X => connections.insert((idx, y_hub)),
            Axis::Y => connections.insert((x_hub, idx)),
        };
    }
    debug!(
        tracks = tracks.len(),
        connections = connections.len(),
        "built tracks"
    );
    Ok((tracks, connections.into_iter().collect()))
}
