// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring queries on the sorted index.
//!
//! Find the nearest point whose distance falls inside a band, for example
//! "the closest shelter that is at least 3 km away".
//!
//! Run:
//! - `cargo run -p understory_demos --example ring_queries`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_knn::{PointRecord, Ring, RingNearestNeighbor, SortedIndex};

/// Narrow a Kurbo point to the `f32` query coordinates the indexes take.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Indexes store and query f32 coordinates; narrowing is intended."
)]
fn query_coords(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let shelters: Vec<_> = [
        (1_u32, Point::new(1.0, 1.5)),
        (2, Point::new(-2.5, 0.5)),
        (3, Point::new(3.0, -2.0)),
        (4, Point::new(0.0, 6.0)),
        (5, Point::new(-7.0, -4.0)),
        (6, Point::new(9.5, 9.5)),
    ]
    .into_iter()
    .map(|(id, p)| PointRecord::from_point(p, id))
    .collect();
    let index = SortedIndex::new(shelters).expect("coordinates are finite");

    let origin = Point::ORIGIN;
    let (x, y) = query_coords(origin);

    tracing::info!(nearest = ?index.query_unbounded_1nn(x, y), "any distance");

    for (near, far) in [(3.0_f32, 5.0_f32), (5.0, 10.0), (10.0, 20.0)] {
        let ring = match Ring::new(near * near, far * far) {
            Ok(ring) => ring,
            Err(err) => {
                tracing::warn!(%err, "skipping band");
                continue;
            }
        };
        match index.query_ring_1nn(x, y, ring) {
            Some(id) => tracing::info!(near, far, id, "nearest in band"),
            None => tracing::info!(near, far, "band is empty"),
        }
    }

    // An inverted band is rejected up front.
    if let Err(err) = Ring::new(25.0, 9.0) {
        tracing::warn!(%err, "invalid band");
    }
}
