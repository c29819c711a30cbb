use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use facewarp_geometry::{Point2d, PointSet, Triangulation};

fn grid_points(side: usize) -> PointSet {
    // jitter the grid so no four points are cocircular
    (0..side * side)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            let jitter = ((i * 7919) % 13) as f32 * 0.01;
            Point2d::new(col as f32 * 10.0 + jitter, row as f32 * 10.0 - jitter)
        })
        .collect()
}

fn bench_delaunay(c: &mut Criterion) {
    let mut group = c.benchmark_group("Delaunay");

    for side in [4, 9, 16] {
        let points = grid_points(side);
        group.throughput(criterion::Throughput::Elements(points.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("bowyer_watson", points.len()),
            &points,
            |b, points| b.iter(|| Triangulation::delaunay(black_box(points))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_delaunay);
criterion_main!(benches);
