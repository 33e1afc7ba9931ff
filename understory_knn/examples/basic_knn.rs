// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory KNN: build both indexes, then query nearest, K-nearest, and rings.

use understory_knn::{
    Bounds, GridConfig, GridIndex, KNearestNeighbors, KnnBuffer, NearestNeighbor, PointRecord,
    Ring, RingNearestNeighbor, SortedIndex,
};

fn main() {
    let points: Vec<_> = [
        ("depot", 2.0, 3.0),
        ("north", 5.0, 18.0),
        ("east", 19.0, 6.0),
        ("centre", 10.0, 10.0),
        ("south", 9.0, 0.5),
    ]
    .into_iter()
    .map(|(name, x, y)| PointRecord::new(name, x, y))
    .collect();

    let config = GridConfig::new(Bounds::new(0.0, 0.0, 20.0, 20.0), 5.0);
    let grid = GridIndex::new(points.iter().copied(), config).unwrap();
    println!("grid: {}x{} cells, {} points", grid.columns(), grid.rows(), grid.len());

    println!("nearest to (8, 8): {:?}", grid.query_1nn(8.0, 8.0));

    // Reuse one buffer across queries.
    let mut buf = KnnBuffer::new();
    for (x, y) in [(0.0, 0.0), (15.0, 15.0)] {
        let mut near = Vec::new();
        grid.query_knn_with(x, y, 3, &mut buf, |p| near.push(*p));
        println!("3 nearest to ({x}, {y}): {near:?}");
    }

    let sorted = SortedIndex::new(points).unwrap();
    let ring = Ring::new(25.0, 100.0).unwrap();
    println!(
        "nearest to (10, 10) between 5 and 10 units: {:?}",
        sorted.query_ring_1nn(10.0, 10.0, ring)
    );

    let mut all = Vec::new();
    sorted.query_knn(10.0, 10.0, usize::MAX, |p| all.push(*p));
    println!("all by distance from (10, 10): {all:?}");
}
