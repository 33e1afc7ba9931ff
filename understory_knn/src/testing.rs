// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures and a brute-force oracle for index tests.

use alloc::vec::Vec;

use rand::Rng;

use crate::types::{PointRecord, Ring};

/// `n` uniformly random points in `[0, w) x [0, h)`, payload = input position.
pub(crate) fn random_points(
    rng: &mut impl Rng,
    n: usize,
    w: f32,
    h: f32,
) -> Vec<PointRecord<usize>> {
    (0..n)
        .map(|i| PointRecord::new(i, rng.random_range(0.0..w), rng.random_range(0.0..h)))
        .collect()
}

/// Points on the axes at growing radii, cycling through the four directions.
///
/// Squared distances to the origin are all distinct, and many points share `x = 0`.
pub(crate) fn cross_points(n: usize) -> Vec<PointRecord<usize>> {
    (0..n)
        .map(|i| {
            let r = 1.0 + i as f32 * 0.75;
            let (x, y) = match i % 4 {
                0 => (r, 0.0),
                1 => (0.0, r),
                2 => (-r, 0.0),
                _ => (0.0, -r),
            };
            PointRecord::new(i, x, y)
        })
        .collect()
}

/// The `k` smallest squared distances from `(x, y)`, ascending.
pub(crate) fn brute_force_dist2<P>(
    points: &[PointRecord<P>],
    x: f32,
    y: f32,
    k: usize,
) -> Vec<f32> {
    let mut d: Vec<f32> = points.iter().map(|p| p.dist2(x, y)).collect();
    d.sort_by(f32::total_cmp);
    d.truncate(k);
    d
}

/// Squared distance of the nearest point inside `ring`, if any.
pub(crate) fn brute_force_ring<P>(
    points: &[PointRecord<P>],
    x: f32,
    y: f32,
    ring: Ring,
) -> Option<f32> {
    points
        .iter()
        .map(|p| p.dist2(x, y))
        .filter(|d| ring.contains(*d))
        .min_by(f32::total_cmp)
}
