// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_knn::{
    Bounds, GridConfig, GridIndex, KnnBuffer, NearestNeighbor, PointRecord, SortedIndex,
};

use rstar::RTree;
use rstar::primitives::GeomWithData;

type Tagged = GeomWithData<[f32; 2], u32>;

fn gen_lattice_points(n: usize, spacing: f32) -> Vec<PointRecord<u32>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            // Jitter off the lattice so distances are rarely tied.
            let jx = ((x * 7 + y * 3) % 11) as f32 * 0.01;
            let jy = ((x * 5 + y * 13) % 17) as f32 * 0.01;
            let id = (y * n + x) as u32;
            out.push(PointRecord::new(id, x as f32 * spacing + jx, y as f32 * spacing + jy));
        }
    }
    out
}

fn to_rstar_points(v: &[PointRecord<u32>]) -> Vec<Tagged> {
    v.iter()
        .map(|p| GeomWithData::new([p.x(), p.y()], *p.payload()))
        .collect()
}

fn queries(extent: f32) -> Vec<(f32, f32)> {
    (0..64)
        .map(|i| {
            let t = i as f32 / 64.0;
            (t * extent, (1.0 - t) * extent * 0.5 + 0.25 * extent)
        })
        .collect()
}

fn bench_rstar_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_rstar_external_compare");
    for &n in &[128usize, 256] {
        let spacing = 4.0;
        let extent = n as f32 * spacing;
        let pts = gen_lattice_points(n, spacing);
        let qs = queries(extent);
        group.throughput(Throughput::Elements(qs.len() as u64));

        let grid = GridIndex::new(
            pts.iter().copied(),
            GridConfig::new(Bounds::new(0.0, 0.0, extent, extent), spacing * 2.0),
        )
        .unwrap();
        let sorted = SortedIndex::new(pts.iter().copied()).unwrap();
        let tree = RTree::bulk_load(to_rstar_points(&pts));

        group.bench_function(format!("understory_grid_1nn_n{}", n), |b| {
            let mut buf = KnnBuffer::with_capacity(1);
            b.iter(|| {
                for &(x, y) in &qs {
                    black_box(grid.query_1nn_with(x, y, &mut buf));
                }
            })
        });

        group.bench_function(format!("understory_sorted_1nn_n{}", n), |b| {
            b.iter(|| {
                for &(x, y) in &qs {
                    black_box(sorted.query_1nn(x, y));
                }
            })
        });

        group.bench_function(format!("rstar_1nn_n{}", n), |b| {
            b.iter(|| {
                for &(x, y) in &qs {
                    black_box(tree.nearest_neighbor(&[x, y]).map(|p| p.data));
                }
            })
        });

        group.bench_function(format!("understory_grid_k40_n{}", n), |b| {
            let mut buf = KnnBuffer::with_capacity(40);
            b.iter(|| {
                let mut acc = 0u64;
                for &(x, y) in &qs {
                    grid.query_knn_with(x, y, 40, &mut buf, |p| acc += u64::from(*p));
                }
                black_box(acc)
            })
        });

        group.bench_function(format!("rstar_k40_n{}", n), |b| {
            b.iter(|| {
                let mut acc = 0u64;
                for &(x, y) in &qs {
                    for p in tree.nearest_neighbor_iter(&[x, y]).take(40) {
                        acc += u64::from(p.data);
                    }
                }
                black_box(acc)
            })
        });

        group.bench_function(format!("understory_grid_build_n{}", n), |b| {
            b.iter_batched(
                || pts.clone(),
                |pts| {
                    black_box(
                        GridIndex::new(
                            pts,
                            GridConfig::new(Bounds::new(0.0, 0.0, extent, extent), spacing * 2.0),
                        )
                        .unwrap(),
                    )
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("rstar_build_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&pts),
                |tagged| black_box(RTree::bulk_load(tagged)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_external_compare);
criterion_main!(benches);
