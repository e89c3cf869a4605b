//! Benchmarks for the kulture grid topology
//!
//! Measures performance of:
//! - Neighbor coordinate computation
//! - Location key formatting and parsing
//! - Greedy walks across the hex plane

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kulture_topology::{CubeCoord, Direction};

/// Benchmark computing the six neighbors of a cell
fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");

    let coords = [
        CubeCoord::ORIGIN,
        CubeCoord::new(5, -3, -2),
        CubeCoord::new(50, -25, -25),
    ];

    for coord in coords {
        let ring = coord.distance(&CubeCoord::ORIGIN);
        group.throughput(Throughput::Elements(6));
        group.bench_with_input(BenchmarkId::new("ring", ring), &coord, |b, &c| {
            b.iter(|| black_box(c).neighbors())
        });
    }
    group.finish();
}

/// Benchmark location key formatting and parsing
fn bench_location_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("location_key");
    let coord = CubeCoord::new(-1234, 567, 667);
    let key = coord.to_string();

    group.bench_function("format", |b| b.iter(|| black_box(coord).to_string()));
    group.bench_function("parse", |b| {
        b.iter(|| black_box(key.as_str()).parse::<CubeCoord>())
    });
    group.finish();
}

/// Greedy walk: at each hop, step to the neighbor closest to the destination
fn greedy_walk(src: CubeCoord, dst: CubeCoord) -> u64 {
    let mut current = src;
    let mut hops = 0u64;

    const MAX_HOPS: u64 = 10_000;

    while current != dst && hops < MAX_HOPS {
        let best = Direction::ALL
            .iter()
            .map(|&d| current.neighbor(d))
            .min_by_key(|n| n.distance(&dst))
            .unwrap_or(current);

        if best.distance(&dst) >= current.distance(&dst) {
            break;
        }

        current = best;
        hops += 1;
    }

    hops
}

/// Benchmark walks at increasing distances
fn bench_greedy_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_walk");
    group.sample_size(50);

    for &ring in &[5i64, 10, 20, 50] {
        let dst = CubeCoord::new(ring, -ring, 0);
        group.bench_with_input(BenchmarkId::new("ring", ring), &dst, |b, &d| {
            b.iter(|| greedy_walk(black_box(CubeCoord::ORIGIN), black_box(d)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_neighbors, bench_location_key, bench_greedy_walk);

criterion_main!(benches);
