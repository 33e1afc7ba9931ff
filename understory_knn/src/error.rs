// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for index construction and ring bounds.

/// Errors reported when building an index or describing a query ring.
///
/// Empty results are never errors: a query that finds nothing returns `None`
/// or emits no payloads.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// The grid domain is non-finite or inverted.
    #[error("invalid bounds ({min_x}, {min_y})..({max_x}, {max_y})")]
    InvalidBounds {
        /// Minimum x of the rejected bounds.
        min_x: f32,
        /// Minimum y of the rejected bounds.
        min_y: f32,
        /// Maximum x of the rejected bounds.
        max_x: f32,
        /// Maximum y of the rejected bounds.
        max_y: f32,
    },

    /// Cell dimensions must be finite and positive.
    #[error("cell size must be finite and positive, got {width}x{height}")]
    InvalidCellSize {
        /// Rejected cell width.
        width: f32,
        /// Rejected cell height.
        height: f32,
    },

    /// The bounds and cell size describe more cells than can be addressed.
    #[error("grid of {columns}x{rows} cells is too large")]
    GridTooLarge {
        /// Column count (saturated).
        columns: usize,
        /// Row count (saturated).
        rows: usize,
    },

    /// A point record handed to a constructor has a NaN or infinite coordinate.
    #[error("non-finite point coordinate ({x}, {y})")]
    NonFiniteCoordinate {
        /// The offending x coordinate.
        x: f32,
        /// The offending y coordinate.
        y: f32,
    },

    /// A point record's coordinate is finite but beyond [`MAX_COORDINATE`](crate::MAX_COORDINATE),
    /// where squared distances could overflow.
    #[error("point coordinate ({x}, {y}) exceeds the supported magnitude")]
    CoordinateOutOfRange {
        /// The offending x coordinate.
        x: f32,
        /// The offending y coordinate.
        y: f32,
    },

    /// Ring bounds are NaN or inverted.
    #[error("invalid ring: min_dist2 {min_dist2} must not exceed max_dist2 {max_dist2}")]
    InvalidRing {
        /// Rejected lower bound.
        min_dist2: f32,
        /// Rejected upper bound.
        max_dist2: f32,
    },
}
