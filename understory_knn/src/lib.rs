// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory KNN: nearest-neighbour queries over a static set of 2D points.
//!
//! Build an index once from [`PointRecord`]s (an `f32` coordinate plus an opaque payload),
//! then query it many times. Queries return payloads only.
//!
//! - [`GridIndex`]: uniform grid over a bounding domain. K-nearest queries expand outward
//!   ring by ring from the query's home cell, collecting into a bounded [`KnnBuffer`].
//! - [`SortedIndex`]: points sorted by x. Answers ring queries (nearest point with squared
//!   distance in `[min, max)`), K-nearest queries, and a lazy unbounded [`NearestIter`].
//!
//! Both implement the [`NearestNeighbor`] and [`KNearestNeighbors`] capabilities;
//! [`SortedIndex`] also implements [`RingNearestNeighbor`].
//!
//! # Example
//!
//! ```rust
//! use understory_knn::{Bounds, GridConfig, GridIndex, KNearestNeighbors, NearestNeighbor, PointRecord};
//!
//! let points = [
//!     PointRecord::new("a", 0.0, 0.0),
//!     PointRecord::new("b", 10.0, 0.0),
//!     PointRecord::new("c", 4.0, 9.0),
//! ];
//! let config = GridConfig::new(Bounds::new(0.0, 0.0, 10.0, 10.0), 2.5);
//! let grid = GridIndex::new(points, config).unwrap();
//!
//! assert_eq!(grid.query_1nn(1.0, 1.0), Some(&"a"));
//!
//! let mut near = Vec::new();
//! grid.query_knn(6.0, 2.0, 2, |p| near.push(*p));
//! assert_eq!(near, ["b", "a"]);
//! ```
//!
//! Ring queries and lazy iteration live on the sorted index:
//!
//! ```rust
//! use understory_knn::{PointRecord, Ring, RingNearestNeighbor, SortedIndex};
//!
//! let sorted = SortedIndex::new((0..5).map(|i| PointRecord::new(i, i as f32, 0.0))).unwrap();
//!
//! // Nearest point at least 2 units (squared: 4) from the origin.
//! let ring = Ring::beyond(4.0).unwrap();
//! assert_eq!(sorted.query_ring_1nn(0.0, 0.0, ring), Some(&2));
//!
//! let order: Vec<_> = sorted.iter_nearest(3.1, 0.0).copied().collect();
//! assert_eq!(order, [3, 4, 2, 1, 0]);
//! ```
//!
//! ## Choosing an index
//!
//! - `GridIndex`: best when points are spread over a known domain and `k` is small. Pick a
//!   cell size so a typical cell holds a few points; there is no auto-tuning. Queries take
//!   a caller-owned [`KnnBuffer`] (`query_knn_with`) to avoid allocating per query; keep one
//!   buffer per thread.
//! - `SortedIndex`: no tuning and no scratch state, safe to share across threads. Each
//!   result costs one ring scan, so it favours `1`-NN and small `k`.
//!
//! ### Float semantics
//!
//! Constructors reject non-finite coordinates and coordinates beyond [`MAX_COORDINATE`],
//! so every squared distance between indexed points is finite. Query coordinates are
//! assumed to lie in the same range; debug builds assert. Distances are compared squared. The relative order of points at
//! exactly equal distance is unspecified, and the sorted index's K-nearest and lazy
//! queries report only one of several points sharing a squared distance.

#![no_std]

extern crate alloc;

pub mod backends;
pub mod buffer;
pub mod config;
pub mod error;
pub mod query;
pub mod types;

#[cfg(test)]
mod testing;

pub use backends::grid::GridIndex;
pub use backends::sorted::{NearestIter, SortedIndex};
pub use buffer::KnnBuffer;
pub use config::{GridConfig, MAX_GRID_CELLS};
pub use error::KnnError;
pub use query::{KNearestNeighbors, NearestNeighbor, RingNearestNeighbor};
pub use types::{Bounds, MAX_COORDINATE, PointRecord, Ring};
