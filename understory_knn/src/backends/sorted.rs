// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sorted-by-x ring index with a bidirectional scan from a binary-search anchor.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::error::KnnError;
use crate::query::{KNearestNeighbors, NearestNeighbor, RingNearestNeighbor};
use crate::types::{PointRecord, Ring, in_range};

/// Point index sorted by x coordinate.
///
/// Ring queries anchor on the first point with `x >= query.x` and scan outward in
/// both directions at once. Because the array is sorted, the horizontal term `dx²`
/// only grows as a cursor moves away from the anchor, so a cursor is retired for
/// good as soon as `dx²` alone exceeds the best squared distance found so far.
///
/// K-nearest queries and [`NearestIter`] are built from repeated ring queries whose
/// lower bound moves just past the previous hit. Points at exactly the same squared
/// distance as an earlier result are therefore skipped.
///
/// The index holds no per-query state and is safe to query from many threads.
pub struct SortedIndex<P> {
    points: Vec<PointRecord<P>>,
}

impl<P> SortedIndex<P> {
    /// Build the index, sorting a copy of the points by x.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::NonFiniteCoordinate`] if any record has a NaN or infinite
    /// coordinate, or [`KnnError::CoordinateOutOfRange`] if one lies beyond
    /// [`MAX_COORDINATE`](crate::MAX_COORDINATE).
    pub fn new(points: impl IntoIterator<Item = PointRecord<P>>) -> Result<Self, KnnError> {
        let mut points: Vec<_> = points.into_iter().collect();
        points.iter().try_for_each(PointRecord::check_coordinates)?;
        points.sort_by(PointRecord::cmp_x);
        tracing::debug!(points = points.len(), "built sorted index");
        Ok(Self { points })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All records in ascending x order.
    pub fn points(&self) -> &[PointRecord<P>] {
        &self.points
    }

    /// Position of the first record with `x >= x`, or `len()` if there is none.
    pub fn anchor(&self, x: f32) -> usize {
        self.points.partition_point(|p| p.x() < x)
    }

    /// The record nearest to `(x, y)` whose squared distance lies in `ring`.
    pub fn nearest_in_ring(&self, x: f32, y: f32, ring: Ring) -> Option<&PointRecord<P>> {
        debug_assert!(
            in_range(x) && in_range(y),
            "query coordinates must be finite and within MAX_COORDINATE"
        );
        let len = self.points.len();
        let anchor = self.anchor(x);
        // `left` is one past the next record on the left; `right` is the next record on the right.
        let mut left = anchor;
        let mut right = anchor;
        let mut go_left = left > 0;
        let mut go_right = right < len;
        let mut scan = Scan {
            x,
            y,
            min_dist2: ring.min_dist2(),
            max_dist2: ring.max_dist2(),
            best: None,
        };
        while go_left || go_right {
            if go_left {
                left -= 1;
                go_left = scan.probe(&self.points[left]) && left > 0;
            }
            if go_right {
                go_right = scan.probe(&self.points[right]) && right + 1 < len;
                right += 1;
            }
        }
        scan.best
    }

    /// Lazily yield every payload in ascending distance from `(x, y)`.
    ///
    /// Each step runs one ring query; the iterator ends the first time nothing is left.
    pub fn iter_nearest(&self, x: f32, y: f32) -> NearestIter<'_, P> {
        NearestIter {
            index: self,
            x,
            y,
            cursor: Cursor::Ready { min_dist2: 0.0 },
        }
    }
}

/// Running state of one bidirectional scan.
struct Scan<'a, P> {
    x: f32,
    y: f32,
    min_dist2: f32,
    max_dist2: f32,
    best: Option<&'a PointRecord<P>>,
}

impl<'a, P> Scan<'a, P> {
    /// Consider `p`; returns false once its direction can no longer improve on the best.
    #[inline]
    fn probe(&mut self, p: &'a PointRecord<P>) -> bool {
        let dx = p.x() - self.x;
        let dx2 = dx * dx;
        if dx2 > self.max_dist2 {
            return false;
        }
        let dy = p.y() - self.y;
        let d2 = dx2 + dy * dy;
        if d2 >= self.min_dist2 && d2 < self.max_dist2 {
            self.best = Some(p);
            self.max_dist2 = d2;
        }
        true
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Cursor {
    /// The next result is the nearest point at or beyond `min_dist2`.
    Ready { min_dist2: f32 },
    Exhausted,
}

/// Unbounded K-nearest iterator returned by [`SortedIndex::iter_nearest`].
///
/// Yields payloads nearest first. Once it returns `None` it stays exhausted;
/// start a new iterator to scan again.
pub struct NearestIter<'a, P> {
    index: &'a SortedIndex<P>,
    x: f32,
    y: f32,
    cursor: Cursor,
}

impl<'a, P> Iterator for NearestIter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        let Cursor::Ready { min_dist2 } = self.cursor else {
            return None;
        };
        let ring = Ring::beyond_unchecked(min_dist2);
        match self.index.nearest_in_ring(self.x, self.y, ring) {
            Some(p) => {
                self.cursor = Cursor::Ready {
                    min_dist2: p.dist2(self.x, self.y).next_up(),
                };
                Some(p.payload())
            }
            None => {
                self.cursor = Cursor::Exhausted;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Cursor::Ready { .. } => (0, Some(self.index.len())),
            Cursor::Exhausted => (0, Some(0)),
        }
    }
}

impl<P> FusedIterator for NearestIter<'_, P> {}

impl<P> Debug for NearestIter<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NearestIter")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<P> NearestNeighbor<P> for SortedIndex<P> {
    fn query_1nn(&self, x: f32, y: f32) -> Option<&P> {
        self.query_unbounded_1nn(x, y)
    }
}

impl<P> RingNearestNeighbor<P> for SortedIndex<P> {
    fn query_ring_1nn(&self, x: f32, y: f32, ring: Ring) -> Option<&P> {
        self.nearest_in_ring(x, y, ring).map(PointRecord::payload)
    }
}

impl<P> KNearestNeighbors<P> for SortedIndex<P> {
    fn query_knn<'a, F>(&'a self, x: f32, y: f32, k: usize, emit: F)
    where
        F: FnMut(&'a P),
        P: 'a,
    {
        self.iter_nearest(x, y).take(k).for_each(emit);
    }
}

impl<P> Debug for SortedIndex<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let span = self
            .points
            .first()
            .zip(self.points.last())
            .map(|(a, b)| (a.x(), b.x()));
        f.debug_struct("SortedIndex")
            .field("points", &self.points.len())
            .field("x_span", &span)
            .finish_non_exhaustive()
    }
}
