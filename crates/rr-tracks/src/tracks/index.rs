//! Track set with connectivity checks and pin adjacency lookup.

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::points::Position;

use super::build::{Axis, Track};

/// Side of a track a pin sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    NoSide,
    Left,
    Right,
    Top,
    Bottom,
}

impl Track {
    /// Where a wire at `coord` meets this track.
    ///
    /// X tracks: `Top` when the wire shares the track's `y`, `Bottom` when it
    /// sits one row above. Y tracks: `Right` when it shares `x`, `Left` when
    /// it sits one column to the right. The wire must lie within the span.
    pub fn side_of(&self, coord: Position) -> Direction {
        let (along, across) = match self.axis {
            Axis::X => (coord.x, coord.y),
            Axis::Y => (coord.y, coord.x),
        };
        let (low, high) = self.span();
        if along < low || along > high {
            return Direction::NoSide;
        }
        let fixed = self.fixed();
        let on_line = across == fixed;
        let next = across.checked_sub(1) == Some(fixed);
        match (self.axis, on_line, next) {
            (Axis::X, true, _) => Direction::Top,
            (Axis::X, _, true) => Direction::Bottom,
            (Axis::Y, true, _) => Direction::Right,
            (Axis::Y, _, true) => Direction::Left,
            _ => Direction::NoSide,
        }
    }
}

/// Immutable track list with its connection pairs and a per-coordinate
/// adjacency cache.
#[derive(Clone, Debug, Default)]
pub struct Tracks {
    tracks: Vec<Track>,
    connections: Vec<(usize, usize)>,
    cache: HashMap<Position, BTreeMap<Direction, usize>>,
}

impl Tracks {
    pub fn new(tracks: Vec<Track>, connections: Vec<(usize, usize)>) -> Self {
        Self {
            tracks,
            connections,
            cache: HashMap::new(),
        }
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn connections(&self) -> &[(usize, usize)] {
        &self.connections
    }

    /// All tracks form one component and no connection joins two tracks on
    /// the same axis.
    pub fn verify(&self) -> Result<()> {
        let n = self.tracks.len();
        let mut uf = UnionFind::<usize>::new(n);
        for &(a, b) in &self.connections {
            if a >= n || b >= n {
                return Err(Error::invariant(format!(
                    "connection ({a}, {b}) out of range for {n} tracks"
                )));
            }
            if uf.equiv(a, b) {
                continue;
            }
            if self.tracks[a].axis == self.tracks[b].axis {
                return Err(Error::SameAxis { a, b });
            }
            uf.union(a, b);
        }
        let components = (0..n).map(|i| uf.find(i)).collect::<HashSet<_>>().len();
        if components != 1 {
            return Err(Error::Disconnected { components });
        }
        Ok(())
    }

    /// Side of track `idx` a wire at `coord` sits on; `None` for an unknown
    /// track.
    pub fn is_wire_adjacent_to_track(&self, idx: usize, coord: Position) -> Option<Direction> {
        self.tracks.get(idx).map(|t| t.side_of(coord))
    }

    /// One adjacent track per side for a wire at `coord`; later tracks win.
    /// Memoized per coordinate.
    pub fn get_tracks_for_wire_at_coord(&mut self, coord: Position) -> &BTreeMap<Direction, usize> {
        let tracks = &self.tracks;
        self.cache
            .entry(coord)
            .or_insert_with(|| adjacent(tracks, coord))
    }

    /// `(low, high, track_index)` for every track along `axis`, in track
    /// order.
    pub fn channel_entries(&self, axis: Axis) -> Vec<(i32, i32, usize)> {
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.axis == axis)
            .map(|(i, t)| {
                let (low, high) = t.span();
                (low, high, i)
            })
            .collect()
    }
}

fn adjacent(tracks: &[Track], coord: Position) -> BTreeMap<Direction, usize> {
    let mut sides = BTreeMap::new();
    for (idx, track) in tracks.iter().enumerate() {
        match track.side_of(coord) {
            Direction::NoSide => {}
            side => {
                sides.insert(side, idx);
            }
        }
    }
    sides
}
