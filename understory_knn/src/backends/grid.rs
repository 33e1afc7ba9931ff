// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid index. Buckets points by cell and searches outward in square rings.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::buffer::KnnBuffer;
use crate::config::GridConfig;
use crate::error::KnnError;
use crate::query::{KNearestNeighbors, NearestNeighbor};
use crate::types::{PointRecord, in_range};

bitflags::bitflags! {
    /// Sides of the scanned window that have not reached the grid boundary.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Frontier: u8 {
        const X_LOW  = 0b0001;
        const X_HIGH = 0b0010;
        const Y_LOW  = 0b0100;
        const Y_HIGH = 0b1000;
    }
}

/// Inclusive rectangle of scanned cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Window {
    lo_x: usize,
    hi_x: usize,
    lo_y: usize,
    hi_y: usize,
}

impl Window {
    const fn cell(col: usize, row: usize) -> Self {
        Self {
            lo_x: col,
            hi_x: col,
            lo_y: row,
            hi_y: row,
        }
    }

    fn frontier(&self, columns: usize, rows: usize) -> Frontier {
        let mut f = Frontier::empty();
        f.set(Frontier::X_LOW, self.lo_x > 0);
        f.set(Frontier::X_HIGH, self.hi_x + 1 < columns);
        f.set(Frontier::Y_LOW, self.lo_y > 0);
        f.set(Frontier::Y_HIGH, self.hi_y + 1 < rows);
        f
    }

    fn grow(&self, f: Frontier) -> Self {
        Self {
            lo_x: self.lo_x - usize::from(f.contains(Frontier::X_LOW)),
            hi_x: self.hi_x + usize::from(f.contains(Frontier::X_HIGH)),
            lo_y: self.lo_y - usize::from(f.contains(Frontier::Y_LOW)),
            hi_y: self.hi_y + usize::from(f.contains(Frontier::Y_HIGH)),
        }
    }
}

/// Uniform grid index over a fixed bounding domain.
///
/// Points are bucketed into square (or rectangular) cells at construction. A
/// point outside the domain is clamped to the nearest edge cell rather than
/// rejected. Queries start in the home cell of the query coordinate and grow
/// the scanned window one ring of cells at a time until no unscanned cell can
/// hold anything closer than the current `k`-th best.
///
/// Query methods taking a [`KnnBuffer`] reuse caller-owned scratch; the trait
/// methods allocate a fresh buffer per call. The index itself is immutable and
/// may be shared freely between threads, each with its own buffer.
pub struct GridIndex<P> {
    config: GridConfig,
    columns: usize,
    rows: usize,
    // `cell_starts[c]..cell_starts[c + 1]` is cell `c`'s range in `points`.
    cell_starts: Vec<usize>,
    points: Vec<PointRecord<P>>,
}

impl<P> GridIndex<P> {
    /// Build a grid index from a point set.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid (see [`GridConfig::dimensions`]), if
    /// any record has a non-finite coordinate ([`KnnError::NonFiniteCoordinate`]), or
    /// if one lies beyond [`MAX_COORDINATE`](crate::MAX_COORDINATE)
    /// ([`KnnError::CoordinateOutOfRange`]).
    pub fn new(
        points: impl IntoIterator<Item = PointRecord<P>>,
        config: GridConfig,
    ) -> Result<Self, KnnError> {
        let (columns, rows) = config.dimensions()?;
        let mut index = Self {
            config,
            columns,
            rows,
            cell_starts: Vec::new(),
            points: Vec::new(),
        };

        let mut keyed = Vec::new();
        for p in points {
            p.check_coordinates()?;
            let (col, row) = index.cell_of(p.x(), p.y());
            keyed.push((row * columns + col, p));
        }
        // Stable, so each bucket keeps input order.
        keyed.sort_by_key(|(cell, _)| *cell);

        let mut starts = vec![0_usize; columns * rows + 1];
        for (cell, _) in &keyed {
            starts[cell + 1] += 1;
        }
        for i in 1..starts.len() {
            starts[i] += starts[i - 1];
        }
        index.cell_starts = starts;
        index.points = keyed.into_iter().map(|(_, p)| p).collect();

        tracing::debug!(
            points = index.points.len(),
            columns,
            rows,
            occupied = index.occupied_cells(),
            "built grid index"
        );
        Ok(index)
    }

    /// The configuration the grid was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of cell columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cell rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All records, grouped by cell in row-major order.
    pub fn points(&self) -> &[PointRecord<P>] {
        &self.points
    }

    /// The record stored at `slot`, as reported by a [`KnnBuffer`] filled by this index.
    pub fn record(&self, slot: usize) -> Option<&PointRecord<P>> {
        self.points.get(slot)
    }

    /// Number of points bucketed in the cell at `(col, row)`; zero outside the grid.
    pub fn cell_len(&self, col: usize, row: usize) -> usize {
        if col >= self.columns || row >= self.rows {
            return 0;
        }
        let cell = row * self.columns + col;
        self.cell_starts[cell + 1] - self.cell_starts[cell]
    }

    /// The `(col, row)` cell a coordinate falls into after clamping to the domain.
    pub fn cell_of(&self, x: f32, y: f32) -> (usize, usize) {
        let b = self.config.bounds();
        let (cx, cy) = b.clamp(x, y);
        (
            axis_cell(cx, b.min_x, self.config.cell_width(), self.columns),
            axis_cell(cy, b.min_y, self.config.cell_height(), self.rows),
        )
    }

    /// Nearest payload to `(x, y)`, reusing `buf` as scratch.
    pub fn query_1nn_with(&self, x: f32, y: f32, buf: &mut KnnBuffer) -> Option<&P> {
        self.search(x, y, 1, buf);
        buf.iter().next().map(|(_, slot)| self.points[slot].payload())
    }

    /// Emit up to `k` payloads nearest to `(x, y)`, nearest first, reusing `buf` as scratch.
    ///
    /// On return `buf` still holds the `(dist2, slot)` results; resolve slots with
    /// [`record`](Self::record).
    pub fn query_knn_with<'a, F>(
        &'a self,
        x: f32,
        y: f32,
        k: usize,
        buf: &mut KnnBuffer,
        mut emit: F,
    ) where
        F: FnMut(&'a P),
    {
        self.search(x, y, k, buf);
        for (_, slot) in buf.iter() {
            emit(self.points[slot].payload());
        }
    }

    fn search(&self, x: f32, y: f32, k: usize, buf: &mut KnnBuffer) {
        debug_assert!(
            in_range(x) && in_range(y),
            "query coordinates must be finite and within MAX_COORDINATE"
        );
        // Capped so an oversized `k` never sizes the buffer past the point count.
        let k = k.min(self.points.len());
        buf.reset(k);
        if k == 0 {
            return;
        }

        let (col, row) = self.cell_of(x, y);
        self.scan_cell(col, row, x, y, buf);

        let mut window = Window::cell(col, row);
        let mut rings = 0_usize;
        loop {
            let frontier = window.frontier(self.columns, self.rows);
            if frontier.is_empty() {
                break;
            }
            if buf.is_full() {
                let reach = self.reach(x, y, window, frontier);
                if buf.max_dist2() <= reach * reach {
                    break;
                }
            }
            window = self.scan_ring(x, y, window, frontier, buf);
            rings += 1;
        }
        tracing::trace!(rings, found = buf.len(), "grid knn query");
    }

    /// Scan the cells `window.grow(frontier)` adds and return the grown window.
    fn scan_ring(
        &self,
        x: f32,
        y: f32,
        window: Window,
        frontier: Frontier,
        buf: &mut KnnBuffer,
    ) -> Window {
        let grown = window.grow(frontier);
        // New rows span the full grown width and new columns only the old rows,
        // so each corner is scanned once.
        if frontier.contains(Frontier::Y_LOW) {
            for col in grown.lo_x..=grown.hi_x {
                self.scan_cell(col, grown.lo_y, x, y, buf);
            }
        }
        if frontier.contains(Frontier::Y_HIGH) {
            for col in grown.lo_x..=grown.hi_x {
                self.scan_cell(col, grown.hi_y, x, y, buf);
            }
        }
        if frontier.contains(Frontier::X_LOW) {
            for row in window.lo_y..=window.hi_y {
                self.scan_cell(grown.lo_x, row, x, y, buf);
            }
        }
        if frontier.contains(Frontier::X_HIGH) {
            for row in window.lo_y..=window.hi_y {
                self.scan_cell(grown.hi_x, row, x, y, buf);
            }
        }
        grown
    }

    /// Distance from the query to the nearest unscanned cell.
    ///
    /// Only sides still on the frontier count: nothing lies past a side that
    /// touches the grid boundary, since out-of-domain points live in edge cells.
    fn reach(&self, x: f32, y: f32, window: Window, frontier: Frontier) -> f32 {
        let b = self.config.bounds();
        let cw = self.config.cell_width();
        let ch = self.config.cell_height();
        let mut reach = f32::INFINITY;
        if frontier.contains(Frontier::X_LOW) {
            reach = reach.min(x - cell_edge(b.min_x, cw, window.lo_x));
        }
        if frontier.contains(Frontier::X_HIGH) {
            reach = reach.min(cell_edge(b.min_x, cw, window.hi_x + 1) - x);
        }
        if frontier.contains(Frontier::Y_LOW) {
            reach = reach.min(y - cell_edge(b.min_y, ch, window.lo_y));
        }
        if frontier.contains(Frontier::Y_HIGH) {
            reach = reach.min(cell_edge(b.min_y, ch, window.hi_y + 1) - y);
        }
        reach.max(0.0)
    }

    #[inline]
    fn scan_cell(&self, col: usize, row: usize, x: f32, y: f32, buf: &mut KnnBuffer) {
        let cell = row * self.columns + col;
        let start = self.cell_starts[cell];
        let end = self.cell_starts[cell + 1];
        for (i, p) in self.points[start..end].iter().enumerate() {
            buf.offer(p.dist2(x, y), start + i);
        }
    }

    fn occupied_cells(&self) -> usize {
        self.cell_starts.windows(2).filter(|w| w[1] > w[0]).count()
    }
}

/// Lower edge of cell `i` along one axis.
///
/// Both cell assignment and the search's stopping distance go through this one
/// expression, so a point in cell `i` is never below `cell_edge(.., i)` in f32.
#[inline]
fn cell_edge(origin: f32, cell: f32, i: usize) -> f32 {
    origin + i as f32 * cell
}

/// Cell index of a clamped coordinate `v`: the `i` with `edge(i) <= v < edge(i + 1)`.
#[inline]
fn axis_cell(v: f32, origin: f32, cell: f32, count: usize) -> usize {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "v is clamped to the domain; truncation is the floor and is capped below."
    )]
    let mut i = (((v - origin) / cell) as usize).min(count - 1);
    // The quotient can land one cell off the multiplied edges; settle on them.
    while i > 0 && cell_edge(origin, cell, i) > v {
        i -= 1;
    }
    while i + 1 < count && cell_edge(origin, cell, i + 1) <= v {
        i += 1;
    }
    i
}

impl<P> NearestNeighbor<P> for GridIndex<P> {
    fn query_1nn(&self, x: f32, y: f32) -> Option<&P> {
        let mut buf = KnnBuffer::with_capacity(1);
        self.query_1nn_with(x, y, &mut buf)
    }
}

impl<P> KNearestNeighbors<P> for GridIndex<P> {
    fn query_knn<'a, F>(&'a self, x: f32, y: f32, k: usize, emit: F)
    where
        F: FnMut(&'a P),
        P: 'a,
    {
        let mut buf = KnnBuffer::new();
        self.query_knn_with(x, y, k, &mut buf, emit);
    }
}

impl<P> Debug for GridIndex<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridIndex")
            .field("bounds", &self.config.bounds())
            .field("cell_width", &self.config.cell_width())
            .field("cell_height", &self.config.cell_height())
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("points", &self.points.len())
            .field("occupied_cells", &self.occupied_cells())
            .finish_non_exhaustive()
    }
}
