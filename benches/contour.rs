//! Benchmarks for contour tracing and Hobby fitting.
//!
//! Run with: cargo bench --bench contour

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plotgeom::geometry::ScalarField;
use plotgeom::math::Point2;
use plotgeom::operations::contour::ContourLevels;
use plotgeom::{contour, fit_hobby};

#[allow(clippy::cast_precision_loss)]
fn axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| -3.0 + 6.0 * i as f64 / (n - 1) as f64).collect()
}

/// Two overlapping bumps, so mid levels produce several loops.
#[allow(clippy::unwrap_used)]
fn ripple(n: usize) -> ScalarField {
    ScalarField::from_fn(axis(n), axis(n), |x, y| {
        (-((x - 1.0).powi(2) + y * y)).exp() + (-((x + 1.0).powi(2) + (y - 0.5).powi(2))).exp()
    })
    .unwrap()
}

#[allow(clippy::cast_precision_loss)]
fn wave(n: usize) -> Vec<Point2> {
    (0..n).map(|i| Point2::new(i as f64, (i as f64 * 0.7).sin())).collect()
}

fn bench_contour(c: &mut Criterion) {
    let mut group = c.benchmark_group("contour");
    for n in [50, 200, 500] {
        let field = ripple(n);
        group.bench_with_input(BenchmarkId::new("ten_levels", n), &field, |b, field| {
            b.iter(|| contour(black_box(field), ContourLevels::Count(10)));
        });
    }
    group.finish();
}

fn bench_hobby(c: &mut Criterion) {
    let mut group = c.benchmark_group("hobby");
    for n in [8, 64, 512] {
        let points = wave(n);
        group.bench_with_input(BenchmarkId::new("open", n), &points, |b, points| {
            b.iter(|| fit_hobby(black_box(points), false, None));
        });
        group.bench_with_input(BenchmarkId::new("cyclic", n), &points, |b, points| {
            b.iter(|| fit_hobby(black_box(points), true, None));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contour, bench_hobby);
criterion_main!(benches);
