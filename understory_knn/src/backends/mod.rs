// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index implementations for different search strategies.
//!
//! - `grid`: uniform grid over a fixed domain; ring-expansion search with a bounded result buffer.
//! - `sorted`: single array sorted by x; ring queries by bidirectional scan from a binary-search anchor.
//!
//! Grid termination
//! ----------------
//! The grid scans the query's home cell, then grows the scanned window one ring of
//! cells at a time on every side that has not reached the grid boundary. After each
//! ring it computes `reach`, the distance from the query to the nearest edge of the
//! window on those open sides. Every unscanned point is at least `reach` away, so once
//! the buffer holds `k` results with `max_dist2 <= reach²` the search stops.
//!
//! Sorted termination
//! ------------------
//! For a cursor moving away from the anchor, `dx²` never decreases. When `dx²` exceeds
//! the best squared distance so far, the cursor cannot produce a better candidate and
//! is retired; the scan ends when both cursors are retired or run off the array.

pub mod grid;
pub mod sorted;

pub use grid::GridIndex;
pub use sorted::{NearestIter, SortedIndex};
