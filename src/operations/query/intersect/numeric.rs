//! Intersection pairs without a closed form, reduced to one-dimensional
//! root searches.

use crate::error::{Result, SolveError};
use crate::geometry::{Curve, Function, Implicit, Line};
use crate::math::root::{find_roots_periodic, find_roots_sampled, find_single_root};
use crate::math::{Point2, SolverParams};

/// Sub-intervals per `scan_samples` when sweeping a full parametric domain.
const SWEEP_DENSITY: usize = 4;

/// Crossings of `curve` over `[t0, t1]` with the zero set of `other`.
///
/// Every sign change of `other` along the sampled curve is bisected, as are
/// pairs of crossings that fall between two samples. Closed curves are
/// scanned as periodic. Tangential contacts without a sign change are not
/// reported.
pub(super) fn sampled_implicit(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    other: &dyn Implicit,
    params: &SolverParams,
) -> Result<Vec<Point2>> {
    let samples = params.scan_samples.max(1) * SWEEP_DENSITY;
    let g = |t: f64| {
        let p = curve.evaluate(t);
        other.implicit_value(p.x, p.y)
    };
    let roots = if curve.is_closed() {
        find_roots_periodic(g, t0, t1, samples, params)?
    } else {
        find_roots_sampled(g, t0, t1, samples, params)?
    };
    Ok(roots.into_iter().map(|t| curve.evaluate(t)).collect())
}

/// The single crossing of two graphs inside an x-bracket.
pub(super) fn function_function(
    f: &Function,
    g: &Function,
    bracket: Option<(f64, f64)>,
    params: &SolverParams,
) -> Result<Vec<Point2>> {
    let (x1, x2) = require_bracket(bracket)?;
    let x = find_single_root(|x| f.y(x) - g.y(x), x1, x2, params)?;
    Ok(vec![Point2::new(x, f.y(x))])
}

/// A vertical line meets a graph once, in closed form; any other line needs
/// an x-bracket.
pub(super) fn line_function(
    line: &Line,
    f: &Function,
    bracket: Option<(f64, f64)>,
    params: &SolverParams,
) -> Result<Vec<Point2>> {
    if line.is_vertical() {
        let x = line.point().x;
        let y = f.y(x);
        if !y.is_finite() {
            return Err(SolveError::NoIntersection(format!("function is not finite at x = {x}")).into());
        }
        return Ok(vec![Point2::new(x, y)]);
    }
    let (x1, x2) = require_bracket(bracket)?;
    let x = find_single_root(
        |x| f.y(x) - line.y_at(x).unwrap_or(f64::NAN),
        x1,
        x2,
        params,
    )?;
    Ok(vec![Point2::new(x, f.y(x))])
}

fn require_bracket(bracket: Option<(f64, f64)>) -> Result<(f64, f64)> {
    bracket.ok_or_else(|| {
        SolveError::Ambiguous("intersecting a function requires an x-bracket".into()).into()
    })
}
