use super::point_2d::cross;
use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_params(p1: &Point2, d1: &Vector2, p2: &Point2, d2: &Vector2) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() < TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let dp = p2 - p1;
    let t = cross(&dp, d2) / denom;
    let u = cross(&dp, d1) / denom;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_params(a0, &da, b0, &db)?;

    let inside = |s: f64| (-TOLERANCE..=1.0 + TOLERANCE).contains(&s);
    if inside(t) && inside(u) {
        let t = t.clamp(0.0, 1.0);
        Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}
