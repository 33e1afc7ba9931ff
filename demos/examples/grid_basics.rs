// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid index basics.
//!
//! Index a handful of `kurbo` points, then answer nearest and K-nearest queries
//! with one reused buffer.
//!
//! Run:
//! - `RUST_LOG=understory_knn=trace cargo run -p understory_demos --example grid_basics`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_knn::{Bounds, GridConfig, GridIndex, KnnBuffer, NearestNeighbor, PointRecord};

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

    let stops = [
        ("harbour", Point::new(12.0, 88.0)),
        ("market", Point::new(40.0, 52.0)),
        ("station", Point::new(55.0, 47.0)),
        ("library", Point::new(61.0, 70.0)),
        ("park", Point::new(83.0, 15.0)),
        ("stadium", Point::new(95.0, 91.0)),
        // Outside the grid domain: kept, and filed in the nearest edge cell.
        ("airport", Point::new(140.0, -30.0)),
    ];

    let config = GridConfig::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 20.0);
    let grid = GridIndex::new(
        stops.iter().map(|&(name, p)| PointRecord::from_point(p, name)),
        config,
    )
    .expect("demo configuration is valid");
    tracing::info!(?grid, "index ready");

    let here = Point::new(50.0, 50.0);
    let (x, y) = query_coords(here);
    let nearest = grid.query_1nn(x, y);
    tracing::info!(?nearest, "nearest to centre");

    let mut buf = KnnBuffer::new();
    for probe in [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(70.0, 65.0)] {
        let mut names = Vec::new();
        let (x, y) = query_coords(probe);
        grid.query_knn_with(x, y, 3, &mut buf, |name| names.push(*name));
        tracing::info!(x = probe.x, y = probe.y, ?names, "three nearest");
    }

    // The buffer keeps squared distances alongside slot numbers after each query.
    for (dist2, slot) in buf.iter() {
        if let Some(rec) = grid.record(slot) {
            tracing::info!(
                name = *rec.payload(),
                distance = dist2.sqrt(),
                at = ?rec.point(),
                "last query"
            );
        }
    }
}
