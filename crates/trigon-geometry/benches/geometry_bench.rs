//! Benchmarks for the Trigon geometry kernel
//!
//! Measures performance of:
//! - Euclidean distance at different dimensions
//! - Apex solving
//! - Bounds membership and cheapest-region snapping

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use trigon_geometry::{apex, distance, Bounds, Region, TriangleSide};

/// Benchmark distance at increasing dimension
fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance");

    for &dim in &[2usize, 3, 8, 64] {
        let a: Vec<f64> = (0..dim).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..dim).map(|i| (i * 2) as f64 + 0.5).collect();
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |bench, _| {
            bench.iter(|| distance(black_box(&a), black_box(&b)))
        });
    }
    group.finish();
}

/// Benchmark apex solving on both sides
fn bench_apex(c: &mut Criterion) {
    let a = [12.5, 40.0];
    let b = [63.0, 71.25];
    let partners: [&[f64]; 2] = [&a, &b];

    c.bench_function("apex_bottom", |bench| {
        bench.iter(|| apex(black_box(&partners), TriangleSide::Bottom))
    });
    c.bench_function("apex_top", |bench| {
        bench.iter(|| apex(black_box(&partners), TriangleSide::Top))
    });
}

/// Benchmark membership and snapping against many regions
fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds");

    for &regions in &[1usize, 4, 16, 64] {
        let bounds = Bounds::new(
            (0..regions)
                .map(|i| {
                    let lo = i as f64 * 20.0;
                    Region::rectangle([lo, 0.0], [lo + 10.0, 100.0])
                })
                .collect(),
        );
        let outside = [-5.0, 150.0];

        group.throughput(Throughput::Elements(regions as u64));
        group.bench_with_input(BenchmarkId::new("contains", regions), &bounds, |bench, bounds| {
            bench.iter(|| bounds.contains(black_box(&outside)))
        });
        group.bench_with_input(BenchmarkId::new("snap", regions), &bounds, |bench, bounds| {
            bench.iter(|| {
                let mut spot = outside;
                bounds.snap_into_cheapest(black_box(&mut spot));
                spot
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_distance, bench_apex, bench_bounds);
criterion_main!(benches);
