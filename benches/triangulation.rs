//! Benchmarks for hull and triangulation algorithms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tessera::hull::convex_hull;
use tessera::polygon::{triangulate_polygon, Polygon};
use tessera::sampling::regular_polygon;
use tessera::triangulation::delaunay_triangulation;
use tessera::Point2;

/// Deterministic scattered points from a golden-ratio sequence.
fn scattered(count: usize) -> Vec<Point2<f64>> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            Point2::new(
                (t * 0.618_033_988_7).fract() * 100.0,
                (t * 0.754_877_666_2).fract() * 100.0,
            )
        })
        .collect()
}

/// A star polygon alternating between two radii.
fn star(points: usize) -> Polygon<f64> {
    let outer = regular_polygon(points, 10.0, 0.0);
    let vertices = outer
        .into_iter()
        .enumerate()
        .map(|(i, p)| if i % 2 == 0 { p } else { Point2::new(p.x * 0.4, p.y * 0.4) })
        .collect();
    Polygon::new(vertices)
}

fn bench_convex_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("convex_hull");

    for count in [100, 1000, 10000] {
        let points = scattered(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| convex_hull(black_box(points)))
        });
    }

    group.finish();
}

fn bench_delaunay(c: &mut Criterion) {
    let mut group = c.benchmark_group("delaunay");
    group.sample_size(20);

    for count in [100, 500, 2000] {
        let points = scattered(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| delaunay_triangulation(black_box(points)))
        });
    }

    group.finish();
}

fn bench_ear_clipping(c: &mut Criterion) {
    let mut group = c.benchmark_group("ear_clipping");

    for count in [16, 128, 512] {
        let polygon = star(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("star", count), &polygon, |b, polygon| {
            b.iter(|| triangulate_polygon(black_box(polygon)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convex_hull, bench_delaunay, bench_ear_clipping);
criterion_main!(benches);
