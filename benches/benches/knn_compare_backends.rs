// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_knn::{
    Bounds, GridConfig, GridIndex, KNearestNeighbors, KnnBuffer, NearestNeighbor, PointRecord,
    Ring, RingNearestNeighbor, SortedIndex,
};

const EXTENT: f32 = 1000.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u32 << 24) as f32)
    }
}

fn gen_uniform_points(count: usize, seed: u64) -> Vec<PointRecord<u32>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|i| PointRecord::new(i as u32, rng.next_f32() * EXTENT, rng.next_f32() * EXTENT))
        .collect()
}

fn gen_clustered_points(
    n_clusters: usize,
    per_cluster: usize,
    spread: f32,
) -> Vec<PointRecord<u32>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = rng.next_f32() * EXTENT;
        let cy = rng.next_f32() * EXTENT;
        for _ in 0..per_cluster {
            let x = (cx + (rng.next_f32() - 0.5) * spread).clamp(0.0, EXTENT);
            let y = (cy + (rng.next_f32() - 0.5) * spread).clamp(0.0, EXTENT);
            out.push(PointRecord::new(out.len() as u32, x, y));
        }
    }
    out
}

fn gen_queries(count: usize) -> Vec<(f32, f32)> {
    let mut rng = Rng::new(0x5EED_0F_0BE11E);
    (0..count)
        .map(|_| (rng.next_f32() * EXTENT, rng.next_f32() * EXTENT))
        .collect()
}

fn grid_config(cell: f32) -> GridConfig {
    GridConfig::new(Bounds::new(0.0, 0.0, EXTENT, EXTENT), cell)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_build");
    for &n in &[10_000usize, 50_000] {
        let pts = gen_uniform_points(n, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                || pts.clone(),
                |pts| black_box(GridIndex::new(pts, grid_config(10.0)).unwrap()),
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("sorted_n{}", n), |b| {
            b.iter_batched(
                || pts.clone(),
                |pts| black_box(SortedIndex::new(pts).unwrap()),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_knn_uniform(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_uniform_50k");
    let pts = gen_uniform_points(50_000, 0xCAFE_F00D_DEAD_BEEF);
    let grid = GridIndex::new(pts.iter().copied(), grid_config(10.0)).unwrap();
    let sorted = SortedIndex::new(pts).unwrap();
    let queries = gen_queries(50);
    group.throughput(Throughput::Elements(queries.len() as u64));

    for &k in &[1usize, 40] {
        group.bench_function(format!("grid_reuse_k{}", k), |b| {
            let mut buf = KnnBuffer::with_capacity(k);
            b.iter(|| {
                let mut acc = 0u64;
                for &(x, y) in &queries {
                    grid.query_knn_with(x, y, k, &mut buf, |p| acc += u64::from(*p));
                }
                black_box(acc)
            })
        });

        group.bench_function(format!("grid_alloc_k{}", k), |b| {
            b.iter(|| {
                let mut acc = 0u64;
                for &(x, y) in &queries {
                    grid.query_knn(x, y, k, |p| acc += u64::from(*p));
                }
                black_box(acc)
            })
        });

        group.bench_function(format!("sorted_k{}", k), |b| {
            b.iter(|| {
                let mut acc = 0u64;
                for &(x, y) in &queries {
                    sorted.query_knn(x, y, k, |p| acc += u64::from(*p));
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

fn bench_cell_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_grid_cell_size");
    let pts = gen_uniform_points(50_000, 0xABCD_1234_5678_9EF0);
    let queries = gen_queries(50);
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &cell in &[2.0_f32, 10.0, 50.0] {
        let grid = GridIndex::new(pts.iter().copied(), grid_config(cell)).unwrap();
        let mut buf = KnnBuffer::new();
        group.bench_function(format!("k40_cell{}", cell), |b| {
            b.iter(|| {
                let mut n = 0usize;
                for &(x, y) in &queries {
                    grid.query_knn_with(x, y, 40, &mut buf, |_| n += 1);
                }
                black_box(n)
            })
        });
    }
    group.finish();
}

fn bench_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_clustered");
    let pts = gen_clustered_points(20, 2_500, 30.0);
    let grid = GridIndex::new(pts.iter().copied(), grid_config(10.0)).unwrap();
    let sorted = SortedIndex::new(pts).unwrap();
    let queries = gen_queries(50);
    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_function("grid_1nn", |b| {
        let mut buf = KnnBuffer::with_capacity(1);
        b.iter(|| {
            for &(x, y) in &queries {
                black_box(grid.query_1nn_with(x, y, &mut buf));
            }
        })
    });

    group.bench_function("sorted_1nn", |b| {
        b.iter(|| {
            for &(x, y) in &queries {
                black_box(sorted.query_1nn(x, y));
            }
        })
    });
    group.finish();
}

fn bench_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_ring");
    let pts = gen_uniform_points(50_000, 0xFEED_FACE_0000_0001);
    let sorted = SortedIndex::new(pts).unwrap();
    let queries = gen_queries(50);
    group.throughput(Throughput::Elements(queries.len() as u64));

    for &(lo, hi) in &[(0.0_f32, f32::INFINITY), (100.0, 400.0), (2500.0, 10_000.0)] {
        let ring = Ring::new(lo, hi).unwrap();
        group.bench_function(format!("sorted_ring_{}_{}", lo, hi), |b| {
            b.iter(|| {
                for &(x, y) in &queries {
                    black_box(sorted.query_ring_1nn(x, y, ring));
                }
            })
        });
    }

    group.bench_function("sorted_iter_take40", |b| {
        b.iter(|| {
            for &(x, y) in &queries {
                black_box(sorted.iter_nearest(x, y).take(40).count());
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_knn_uniform,
    bench_cell_size,
    bench_clustered,
    bench_ring
);
criterion_main!(benches);
