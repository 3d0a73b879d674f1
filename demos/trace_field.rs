//! Traces contours of a sample field and runs a few geometric queries on
//! the result, logging what it finds.
//!
//! Usage:
//! ```text
//! cargo run --example trace_field
//! RUST_LOG=plotgeom=trace cargo run --example trace_field
//! ```

use std::f64::consts::{FRAC_PI_4, PI};

use plotgeom::geometry::{Arc, Circle, Ellipse, Function, Line, ScalarField};
use plotgeom::math::{ExtremumKind, Point2};
use plotgeom::operations::contour::ContourLevels;
use plotgeom::operations::query::{Intersect, TangentsThrough, Which};
use plotgeom::{contour, fit_hobby, intersect, local_extremum, tangent_at, PlotgeomError};

#[allow(clippy::cast_precision_loss)]
fn axis(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64).collect()
}

fn main() -> Result<(), PlotgeomError> {
    // Default: WARN for everything, INFO for plotgeom.
    // Override with RUST_LOG env var (e.g. RUST_LOG=plotgeom=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("trace_field=info".parse().unwrap_or_default())
        .add_directive("plotgeom=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let field = ScalarField::from_fn(axis(-3.0, 3.0, 121), axis(-2.0, 2.0, 81), |x, y| {
        (-((x - 1.0).powi(2) + y * y)).exp() + (-((x + 1.0).powi(2) + y * y)).exp()
    })?;
    let set = contour(&field, ContourLevels::Count(4))?;
    for level in set.iter() {
        let closed = level.polylines.iter().filter(|p| p.closed).count();
        tracing::info!(
            level = level.level,
            polylines = level.polylines.len(),
            closed,
            "contour level traced"
        );
    }

    // Smooth the longest loop of the lowest level through a handful of its points.
    if let Some(ring) = set
        .levels()
        .first()
        .and_then(|l| l.polylines.iter().max_by_key(|p| p.len()))
    {
        let stride = (ring.len() / 8).max(1);
        let knots: Vec<Point2> = ring.points.iter().step_by(stride).copied().collect();
        let spline = fit_hobby(&knots, ring.closed, None)?;
        tracing::info!(
            knots = knots.len(),
            segments = spline.segments().len(),
            "hobby spline fitted"
        );
    }

    let circle = Circle::new(Point2::origin(), 2.0)?;
    let ellipse = Ellipse::new(Point2::new(1.0, 0.5), 2.5, 1.0, FRAC_PI_4)?;
    let hits = intersect(circle, ellipse, None)?;
    for p in hits.points() {
        tracing::info!(x = p.x, y = p.y, "circle meets ellipse");
    }

    let chord = Line::from_points(Point2::new(-3.0, -1.0), Point2::new(3.0, 2.0))?;
    let top = intersect(circle, chord, Some(Which::Top))?.first();
    tracing::info!(x = top.x, y = top.y, "upper chord end");

    let cap = Arc::new(Point2::origin(), 2.0, 0.0, PI)?;
    let on_cap = intersect(cap, chord, None)?;
    tracing::info!(count = on_cap.len(), x = on_cap.first().x, "chord meets upper arc");

    let (t1, t2) = TangentsThrough::new(circle, Point2::new(4.0, 0.0)).execute()?;
    tracing::info!(first = ?t1.slope(), second = ?t2.slope(), "tangents from (4, 0)");

    let wave = Function::new(|x: f64| x.sin() * 1.5);
    let crossings = Intersect::new(wave.clone(), circle).bracket(0.0, 3.0).execute()?;
    tracing::info!(count = crossings.len(), "wave crosses circle");

    let peak = local_extremum(wave.clone(), 0.0, 3.0, ExtremumKind::Maximum)?;
    let level_line = tangent_at(wave, peak.x)?;
    tracing::info!(x = peak.x, y = peak.y, slope = ?level_line.slope(), "wave peak");

    Ok(())
}
