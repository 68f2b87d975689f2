//! Greedy reduction of candidate grid lines to a small covering set.
//!
//! Purpose
//! - Start from every column and row in the bounding box of the points,
//!   attach each point to the lines that can reach it, then drop lines
//!   least-populated first while every point keeps at least one line and
//!   both dimensions keep a crossing line.
//!
//! Notes
//! - Columns are keyed by `x`, rows by `y`. A point at `(x, y)` reaches
//!   columns `x - 1` and `x` and rows `y - 1` and `y`; right-only pins reach
//!   column `x` only and never attach to rows.
//! - Ties between equally populated lines go to the smaller coordinate; ties
//!   between a column and a row go to the column.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::points::Position;

use super::cfg::TrackCfg;

/// One of the two candidate line pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pool {
    /// Vertical lines, keyed by `x`.
    Columns,
    /// Horizontal lines, keyed by `y`.
    Rows,
}

impl Pool {
    const BOTH: [Pool; 2] = [Pool::Columns, Pool::Rows];
}

/// Candidate line with the indices of the points attached to it.
#[derive(Clone, Debug, Default)]
struct Line {
    members: Vec<usize>,
}

/// Reduce `points` to retained `(columns, rows)`, both ascending.
pub fn decompose_points_into_tracks(
    points: &[Position],
    cfg: TrackCfg,
) -> Result<(Vec<i32>, Vec<i32>)> {
    TrackMinimizer::new(points, cfg)?.minimize()
}

/// Minimizer state: candidate lines plus per-point attachment counters.
#[derive(Clone, Debug)]
pub struct TrackMinimizer {
    cfg: TrackCfg,
    points: Vec<Position>,
    /// Number of retained lines each point is attached to.
    attached: Vec<usize>,
    columns: BTreeMap<i32, Line>,
    rows: BTreeMap<i32, Line>,
}

impl TrackMinimizer {
    /// Build the full candidate set and attach every point.
    pub fn new(points: &[Position], cfg: TrackCfg) -> Result<Self> {
        cfg.validate()?;
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

        let span = |lo: i32, hi: i32, bound: Option<i32>| {
            let hi = bound.map_or(hi, |b| hi.min(b));
            (lo.saturating_sub(1).max(0)..=hi)
                .map(|c| (c, Line::default()))
                .collect::<BTreeMap<_, _>>()
        };
        let mut m = Self {
            cfg,
            points: points.to_vec(),
            attached: vec![0; points.len()],
            columns: span(min_x, max_x, cfg.max_column()),
            rows: span(min_y, max_y, cfg.max_row()),
        };

        for (i, &p) in points.iter().enumerate() {
            if cfg.is_corner(p) {
                return Err(Error::CornerPoint { pos: p });
            }
            if cfg.reaches_column(p) && m.columns.contains_key(&p.x) {
                if p.x > 0 && !cfg.right_only {
                    m.attach(Pool::Columns, p.x - 1, i);
                }
                m.attach(Pool::Columns, p.x, i);
            }
            if cfg.reaches_row(p) && !cfg.right_only && m.rows.contains_key(&p.y) {
                if p.y > 0 {
                    m.attach(Pool::Rows, p.y - 1, i);
                }
                m.attach(Pool::Rows, p.y, i);
            }
        }
        debug!(
            points = points.len(),
            columns = m.columns.len(),
            rows = m.rows.len(),
            right_only = cfg.right_only,
            "candidate lines"
        );
        Ok(m)
    }

    fn attach(&mut self, pool: Pool, coord: i32, point: usize) {
        if let Some(line) = self.pool_mut(pool).get_mut(&coord) {
            line.members.push(point);
            self.attached[point] += 1;
        }
    }

    fn pool(&self, pool: Pool) -> &BTreeMap<i32, Line> {
        match pool {
            Pool::Columns => &self.columns,
            Pool::Rows => &self.rows,
        }
    }

    fn pool_mut(&mut self, pool: Pool) -> &mut BTreeMap<i32, Line> {
        match pool {
            Pool::Columns => &mut self.columns,
            Pool::Rows => &mut self.rows,
        }
    }

    fn other(pool: Pool) -> Pool {
        match pool {
            Pool::Columns => Pool::Rows,
            Pool::Rows => Pool::Columns,
        }
    }

    /// `(coordinate, attached points)` for every line still in `pool`.
    pub fn attachments(&self, pool: Pool) -> Vec<(i32, usize)> {
        self.pool(pool)
            .iter()
            .map(|(&c, line)| (c, line.members.len()))
            .collect()
    }

    /// Least-populated line as `(population, coordinate)`.
    fn least(&self, pool: Pool) -> Option<(usize, i32)> {
        self.pool(pool)
            .iter()
            .map(|(&c, line)| (line.members.len(), c))
            .min()
    }

    /// Coordinates of `pool`, least-populated first.
    fn by_population(&self, pool: Pool) -> Vec<i32> {
        let mut order: Vec<(usize, i32)> = self
            .pool(pool)
            .iter()
            .map(|(&c, line)| (line.members.len(), c))
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, c)| c).collect()
    }

    fn removable(&self, pool: Pool, coord: i32) -> bool {
        let own = self.pool(pool);
        let Some(line) = own.get(&coord) else {
            return false;
        };
        if line.members.iter().any(|&i| self.attached[i] <= 1) {
            return false;
        }
        !(own.len() <= 1 && self.pool(Self::other(pool)).len() > 1)
    }

    fn try_remove(&mut self, pool: Pool, coord: i32) -> bool {
        if !self.removable(pool, coord) {
            return false;
        }
        let Some(line) = self.pool_mut(pool).remove(&coord) else {
            return false;
        };
        for &i in &line.members {
            self.attached[i] -= 1;
        }
        trace!(?pool, coord, members = line.members.len(), "removed line");
        true
    }

    /// Run the three reduction passes and check coverage.
    pub fn minimize(mut self) -> Result<(Vec<i32>, Vec<i32>)> {
        // Pass 1: smaller of the two least-populated lines first.
        while let (Some((xn, xc)), Some((yn, yc))) =
            (self.least(Pool::Columns), self.least(Pool::Rows))
        {
            let (first, second) = if xn <= yn {
                ((Pool::Columns, xc), (Pool::Rows, yc))
            } else {
                ((Pool::Rows, yc), (Pool::Columns, xc))
            };
            if !self.try_remove(first.0, first.1) && !self.try_remove(second.0, second.1) {
                break;
            }
        }

        // Pass 2: each dimension on its own.
        for pool in Pool::BOTH {
            while let Some((_, c)) = self.least(pool) {
                if !self.try_remove(pool, c) {
                    break;
                }
            }
        }

        // Pass 3: sweep everything until stable.
        loop {
            let mut removed = false;
            for pool in Pool::BOTH {
                for c in self.by_population(pool) {
                    removed |= self.try_remove(pool, c);
                }
            }
            if !removed {
                break;
            }
        }

        for &p in &self.points {
            if !self.covers(p) {
                return Err(Error::Uncovered { pos: p });
            }
        }

        let columns: Vec<i32> = self.columns.keys().copied().collect();
        let rows: Vec<i32> = self.rows.keys().copied().collect();
        debug!(?columns, ?rows, "retained lines");
        Ok((columns, rows))
    }

    fn covers(&self, p: Position) -> bool {
        let near = |lines: &BTreeMap<i32, Line>, c: i32| {
            lines.contains_key(&c) || (c > 0 && lines.contains_key(&(c - 1)))
        };
        (self.cfg.reaches_column(p) && near(&self.columns, p.x))
            || (self.cfg.reaches_row(p) && near(&self.rows, p.y))
    }
}
