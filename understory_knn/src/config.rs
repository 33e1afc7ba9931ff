// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid geometry configuration.

use crate::error::KnnError;
use crate::types::Bounds;

/// Upper limit on the number of cells a grid may allocate.
pub const MAX_GRID_CELLS: usize = u32::MAX as usize;

/// Domain and cell size for a [`GridIndex`](crate::GridIndex).
///
/// The grid covers `bounds` with `columns x rows` cells, where
/// `columns = floor(width / cell_width) + 1` and `rows = floor(height / cell_height) + 1`.
/// The last row and column may extend past the domain edge.
/// No auto-tuning is performed: pick a cell size so a typical cell holds a
/// handful of points.
///
/// # Example
///
/// ```
/// use understory_knn::{Bounds, GridConfig};
///
/// let config = GridConfig::new(Bounds::new(0.0, 0.0, 100.0, 50.0), 10.0)
///     .with_cell_size(10.0, 5.0);
///
/// assert_eq!(config.dimensions().unwrap(), (11, 11));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    bounds: Bounds,
    cell_width: f32,
    cell_height: f32,
}

impl GridConfig {
    /// Create a configuration with square cells of side `cell_size`.
    pub const fn new(bounds: Bounds, cell_size: f32) -> Self {
        Self {
            bounds,
            cell_width: cell_size,
            cell_height: cell_size,
        }
    }

    /// Sets the cell dimensions.
    pub const fn with_cell_size(mut self, cell_width: f32, cell_height: f32) -> Self {
        self.cell_width = cell_width;
        self.cell_height = cell_height;
        self
    }

    /// Sets the domain.
    pub const fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Returns the domain.
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the cell width.
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Returns the cell height.
    pub const fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidBounds`] for non-finite or inverted bounds and
    /// [`KnnError::InvalidCellSize`] unless both cell dimensions are finite and positive.
    pub fn validate(&self) -> Result<(), KnnError> {
        self.bounds.validate()?;
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !ok(self.cell_width) || !ok(self.cell_height) {
            return Err(KnnError::InvalidCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        Ok(())
    }

    /// Returns `(columns, rows)` for this configuration.
    ///
    /// # Errors
    ///
    /// Everything [`validate`](Self::validate) reports, plus
    /// [`KnnError::GridTooLarge`] when the cell count exceeds [`MAX_GRID_CELLS`].
    pub fn dimensions(&self) -> Result<(usize, usize), KnnError> {
        self.validate()?;
        let columns = cells_along(self.bounds.width(), self.cell_width);
        let rows = cells_along(self.bounds.height(), self.cell_height);
        match (columns, rows) {
            (Some(c), Some(r)) if c.checked_mul(r).is_some_and(|n| n <= MAX_GRID_CELLS) => {
                Ok((c, r))
            }
            _ => Err(KnnError::GridTooLarge {
                columns: columns.unwrap_or(usize::MAX),
                rows: rows.unwrap_or(usize::MAX),
            }),
        }
    }
}

fn cells_along(extent: f32, cell: f32) -> Option<usize> {
    let n = extent / cell;
    if !(n < MAX_GRID_CELLS as f32) {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "n is finite, non-negative, and below MAX_GRID_CELLS; truncation is the floor."
    )]
    let whole = n as usize;
    whole.checked_add(1)
}
