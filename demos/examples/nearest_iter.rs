// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy nearest-first iteration.
//!
//! Walk points outward from a query until one satisfies a predicate, without
//! choosing `k` in advance.
//!
//! Run:
//! - `cargo run -p understory_demos --example nearest_iter`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_knn::{PointRecord, SortedIndex};

#[derive(Copy, Clone, Debug)]
struct Cafe {
    name: &'static str,
    open: bool,
}

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

    let cafes = [
        ("corner", false, Point::new(1.0, 0.0)),
        ("kiosk", false, Point::new(0.0, -2.0)),
        ("roastery", true, Point::new(-3.0, 1.0)),
        ("bakery", true, Point::new(5.0, 5.0)),
        ("diner", false, Point::new(-8.0, -8.0)),
    ];
    let index = SortedIndex::new(
        cafes
            .into_iter()
            .map(|(name, open, p)| PointRecord::from_point(p, Cafe { name, open })),
    )
    .expect("coordinates are finite");

    let me = Point::new(0.2, 0.1);
    let (x, y) = query_coords(me);
    let mut walk = index.iter_nearest(x, y);
    let mut skipped = 0;
    let found = walk.by_ref().find(|cafe| {
        if !cafe.open {
            skipped += 1;
        }
        cafe.open
    });
    tracing::info!(?found, skipped, "first open cafe");

    // The same iterator resumes where it stopped.
    let rest: Vec<_> = walk.map(|cafe| cafe.name).collect();
    tracing::info!(?rest, "everything further away");
}
