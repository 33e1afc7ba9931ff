// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query capabilities shared by the index implementations.
//!
//! - [`NearestNeighbor`]: the single nearest payload.
//! - [`KNearestNeighbors`]: up to `k` payloads, nearest first.
//! - [`RingNearestNeighbor`]: the nearest payload inside a [`Ring`] of squared distances.
//!   Any ring index also answers plain nearest-neighbour queries with [`Ring::UNBOUNDED`].
//!
//! Coordinates must be finite; debug builds assert. Ties between exactly equal
//! distances are resolved in an unspecified order.

use crate::types::Ring;

/// Look up the nearest payload to a point.
pub trait NearestNeighbor<P> {
    /// The payload nearest to `(x, y)`, or `None` if the index is empty.
    fn query_1nn(&self, x: f32, y: f32) -> Option<&P>;
}

/// Look up the `k` nearest payloads to a point.
///
/// Fewer than `k` payloads are emitted when the index holds fewer than `k` points.
/// Large `k` is supported but costs time proportional to the work of collecting all of them.
pub trait KNearestNeighbors<P>: NearestNeighbor<P> {
    /// Emit up to `k` payloads in ascending distance from `(x, y)`.
    fn query_knn<'a, F>(&'a self, x: f32, y: f32, k: usize, emit: F)
    where
        F: FnMut(&'a P),
        P: 'a;
}

/// Look up the nearest payload whose squared distance lies inside a ring.
pub trait RingNearestNeighbor<P>: NearestNeighbor<P> {
    /// The payload nearest to `(x, y)` with squared distance in `ring`, or `None`.
    fn query_ring_1nn(&self, x: f32, y: f32, ring: Ring) -> Option<&P>;

    /// The nearest payload at any distance; equivalent to a ring query with [`Ring::UNBOUNDED`].
    fn query_unbounded_1nn(&self, x: f32, y: f32) -> Option<&P> {
        self.query_ring_1nn(x, y, Ring::UNBOUNDED)
    }
}
