use crate::error::{GeometryError, Result, SolveError};
use crate::geometry::{Curve, Line};
use crate::math::intersect_2d::line_line_params;
use crate::math::Point2;

/// Crossing point of two infinite lines.
///
/// A vertical line fixes the x coordinate exactly; the y coordinate then
/// comes from the other line's slope form.
pub(super) fn line_line(a: &Line, b: &Line) -> Result<Vec<Point2>> {
    if a.coincides_with(b) {
        return Err(GeometryError::Degenerate("lines coincide; infinitely many intersections".into()).into());
    }
    if a.is_parallel(b) {
        return Err(SolveError::NoIntersection("lines are parallel".into()).into());
    }
    let exact = match (a.is_vertical(), b.is_vertical()) {
        (true, false) => b.y_at(a.point().x).map(|y| Point2::new(a.point().x, y)),
        (false, true) => a.y_at(b.point().x).map(|y| Point2::new(b.point().x, y)),
        _ => None,
    };
    if let Some(p) = exact {
        return Ok(vec![p]);
    }
    let (t, _) = line_line_params(a.point(), &a.direction(), b.point(), &b.direction())
        .ok_or_else(|| SolveError::NoIntersection("lines are parallel".into()))?;
    Ok(vec![a.evaluate(t)])
}
