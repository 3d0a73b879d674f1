pub mod contour;
pub mod fitting;
pub mod query;

use crate::error::Result;
use crate::geometry::{BezierSpline, Function, Line, ScalarField, Shape};
use crate::math::{ExtremumKind, Point2};

use contour::{ContourLevels, ContourSet, TraceContours};
use fitting::FitHobby;
use query::{Intersect, Intersection, LocalExtremum, NormalAt, TangentAt, Which};

/// Intersection points of two shapes, optionally reduced by `which`.
///
/// # Errors
///
/// See [`Intersect::execute`].
pub fn intersect(a: impl Into<Shape>, b: impl Into<Shape>, which: Option<Which>) -> Result<Intersection> {
    let op = Intersect::new(a, b);
    match which {
        Some(w) => op.which(w).execute(),
        None => op.execute(),
    }
}

/// Tangent line of `shape` at `param`.
///
/// # Errors
///
/// See [`TangentAt::execute`].
pub fn tangent_at(shape: impl Into<Shape>, param: f64) -> Result<Line> {
    TangentAt::new(shape, param).execute()
}

/// Normal line of `shape` at `param`.
///
/// # Errors
///
/// See [`NormalAt::execute`].
pub fn normal_at(shape: impl Into<Shape>, param: f64) -> Result<Line> {
    NormalAt::new(shape, param).execute()
}

/// Local extremum of `f` within `[x1, x2]`.
///
/// # Errors
///
/// See [`LocalExtremum::execute`].
pub fn local_extremum(f: Function, x1: f64, x2: f64, kind: ExtremumKind) -> Result<Point2> {
    LocalExtremum::new(f, x1, x2, kind).execute()
}

/// Hobby spline through `points` with the given tension (1.0 when `None`).
///
/// # Errors
///
/// See [`FitHobby::execute`].
pub fn fit_hobby(points: &[Point2], cyclic: bool, tension: Option<f64>) -> Result<BezierSpline> {
    FitHobby::new(points.to_vec())
        .cyclic(cyclic)
        .tension(tension.unwrap_or(1.0))
        .execute()
}

/// Contour polylines of `grid` at each level.
///
/// # Errors
///
/// See [`TraceContours::execute`].
pub fn contour(grid: &ScalarField, levels: impl Into<ContourLevels>) -> Result<ContourSet> {
    TraceContours::new(levels).execute(grid)
}
