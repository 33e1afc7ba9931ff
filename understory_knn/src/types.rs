// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point records, domain bounds, and ring bounds.

use core::cmp::Ordering;

use crate::error::KnnError;

/// An immutable 2D point carrying an opaque payload.
///
/// Indexes copy records at build time and never mutate them afterwards.
/// When records need an order (the sorted index), they are compared by `x` only;
/// `y` is not a secondary key, so records with equal `x` have no defined relative order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointRecord<P> {
    payload: P,
    x: f32,
    y: f32,
}

impl<P> PointRecord<P> {
    /// Create a record for `payload` located at `(x, y)`.
    pub const fn new(payload: P, x: f32, y: f32) -> Self {
        Self { payload, x, y }
    }

    /// The payload returned by queries.
    pub const fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the record and return its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// The x coordinate.
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// The y coordinate.
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Squared Euclidean distance from this record to `(x, y)`.
    #[inline]
    pub fn dist2(&self, x: f32, y: f32) -> f32 {
        dist2(self.x, self.y, x, y)
    }

    /// Compare two records by `x` only.
    pub fn cmp_x(&self, other: &Self) -> Ordering {
        self.x.total_cmp(&other.x)
    }

    /// Reject coordinates an index cannot measure distances to.
    pub(crate) fn check_coordinates(&self) -> Result<(), KnnError> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            Err(KnnError::NonFiniteCoordinate {
                x: self.x,
                y: self.y,
            })
        } else if !(in_range(self.x) && in_range(self.y)) {
            Err(KnnError::CoordinateOutOfRange {
                x: self.x,
                y: self.y,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(feature = "kurbo")]
impl<P> PointRecord<P> {
    /// Create a record from a Kurbo point. Coordinates are narrowed to `f32`.
    pub fn from_point(point: kurbo::Point, payload: P) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Indexes store f32 coordinates; narrowing is the documented behavior."
        )]
        let (x, y) = (point.x as f32, point.y as f32);
        Self::new(payload, x, y)
    }

    /// The record's location as a Kurbo point.
    pub fn point(&self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Largest coordinate magnitude an index accepts.
///
/// Any two points within `[-MAX_COORDINATE, MAX_COORDINATE]` on both axes have a
/// finite squared distance in `f32`. Query coordinates must stay in the same range.
pub const MAX_COORDINATE: f32 = 1.0e18;

/// True for finite values within `±MAX_COORDINATE`.
#[inline]
pub(crate) fn in_range(v: f32) -> bool {
    (-MAX_COORDINATE..=MAX_COORDINATE).contains(&v)
}

/// Squared Euclidean distance between `(ax, ay)` and `(bx, by)`.
#[inline]
pub(crate) fn dist2(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

/// Axis-aligned bounding domain for a grid index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Minimum x (left)
    pub min_x: f32,
    /// Minimum y (top)
    pub min_y: f32,
    /// Maximum x (right)
    pub max_x: f32,
    /// Maximum y (bottom)
    pub max_y: f32,
}

impl Bounds {
    /// Create bounds from min/max corners.
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create bounds from origin and size.
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// The smallest bounds containing every record, or `None` for an empty set.
    pub fn enclosing<'a, P: 'a>(
        points: impl IntoIterator<Item = &'a PointRecord<P>>,
    ) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let seed = Self::new(first.x, first.y, first.x, first.y);
        Some(it.fold(seed, |b, p| {
            Self::new(
                b.min_x.min(p.x),
                b.min_y.min(p.y),
                b.max_x.max(p.x),
                b.max_y.max(p.y),
            )
        }))
    }

    /// Width of the domain.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height of the domain.
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Whether the point lies inside the bounds (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Pull a coordinate onto the nearest point of the bounds.
    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x.clamp(self.min_x, self.max_x),
            y.clamp(self.min_y, self.max_y),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), KnnError> {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite();
        if finite && self.min_x <= self.max_x && self.min_y <= self.max_y {
            Ok(())
        } else {
            Err(KnnError::InvalidBounds {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: self.max_y,
            })
        }
    }
}

/// A half-open annulus of squared distances, `[min_dist2, max_dist2)`.
///
/// Ring queries return the nearest point whose squared distance falls inside the ring.
/// Bounds may be infinite; [`Ring::UNBOUNDED`] turns a ring query into a plain
/// nearest-neighbour query. A ring with `min_dist2 == max_dist2` is valid and empty.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ring {
    min_dist2: f32,
    max_dist2: f32,
}

impl Ring {
    /// The ring containing every finite distance.
    pub const UNBOUNDED: Self = Self {
        min_dist2: f32::NEG_INFINITY,
        max_dist2: f32::INFINITY,
    };

    /// Create a ring from squared distance bounds.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidRing`] if either bound is NaN or `min_dist2 > max_dist2`.
    pub fn new(min_dist2: f32, max_dist2: f32) -> Result<Self, KnnError> {
        if min_dist2.is_nan() || max_dist2.is_nan() || min_dist2 > max_dist2 {
            return Err(KnnError::InvalidRing {
                min_dist2,
                max_dist2,
            });
        }
        Ok(Self {
            min_dist2,
            max_dist2,
        })
    }

    /// Everything at or beyond `min_dist2`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidRing`] if `min_dist2` is NaN.
    pub fn beyond(min_dist2: f32) -> Result<Self, KnnError> {
        Self::new(min_dist2, f32::INFINITY)
    }

    /// Everything strictly closer than `max_dist2`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidRing`] if `max_dist2` is NaN.
    pub fn within(max_dist2: f32) -> Result<Self, KnnError> {
        Self::new(f32::NEG_INFINITY, max_dist2)
    }

    // Callers guarantee `min_dist2` is not NaN.
    pub(crate) const fn beyond_unchecked(min_dist2: f32) -> Self {
        Self {
            min_dist2,
            max_dist2: f32::INFINITY,
        }
    }

    /// Inclusive lower bound on the squared distance.
    pub const fn min_dist2(&self) -> f32 {
        self.min_dist2
    }

    /// Exclusive upper bound on the squared distance.
    pub const fn max_dist2(&self) -> f32 {
        self.max_dist2
    }

    /// Whether `dist2` falls inside the ring.
    #[inline]
    pub fn contains(&self, dist2: f32) -> bool {
        dist2 >= self.min_dist2 && dist2 < self.max_dist2
    }
}

impl Default for Ring {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
