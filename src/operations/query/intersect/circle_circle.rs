use crate::error::{GeometryError, Result};
use crate::geometry::Circle;
use crate::math::{Point2, Vector2, TOLERANCE};

/// Radical-line construction for two full circles.
///
/// Returns an empty list when the circles are apart or nested, one point
/// when they touch, and two points symmetric about the line of centers
/// otherwise.
pub(super) fn circle_circle(a: &Circle, b: &Circle) -> Result<Vec<Point2>> {
    let (r1, r2) = (a.radius(), b.radius());
    let delta = b.center() - a.center();
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();
    let scale = r1.max(r2);

    if dist < TOLERANCE * scale {
        if (r1 - r2).abs() < TOLERANCE * scale {
            return Err(GeometryError::Degenerate("circles coincide; infinitely many intersections".into()).into());
        }
        return Ok(Vec::new());
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    let tol = TOLERANCE * scale;
    if dist > sum + tol || dist < diff - tol {
        return Ok(Vec::new());
    }

    // Distance from the first center along the line of centers to the radical line.
    let along = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = ((r1 - along) * (r1 + along)).max(0.0).sqrt();
    let unit = delta / dist;
    let foot = a.center() + unit * along;

    // Half-chord length within tolerance of zero is a tangency.
    if h <= tol {
        return Ok(vec![foot]);
    }
    let perp = Vector2::new(-unit.y, unit.x);
    Ok(vec![foot + perp * h, foot - perp * h])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn circle(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(Point2::new(x, y), r).unwrap()
    }

    #[test]
    fn two_crossings() {
        let pts = circle_circle(&circle(0.0, 0.0, 2.0), &circle(3.0, 0.0, 2.0)).unwrap();
        assert_eq!(pts.len(), 2);
        assert_abs_diff_eq!(pts[0], Point2::new(1.5, 1.75_f64.sqrt()), epsilon = 1e-12);
        assert_abs_diff_eq!(pts[1], Point2::new(1.5, -(1.75_f64.sqrt())), epsilon = 1e-12);
    }

    #[test]
    fn external_and_internal_tangency() {
        let pts = circle_circle(&circle(0.0, 0.0, 1.0), &circle(2.0, 0.0, 1.0)).unwrap();
        assert_eq!(pts.len(), 1);
        assert_abs_diff_eq!(pts[0], Point2::new(1.0, 0.0), epsilon = 1e-12);

        let pts = circle_circle(&circle(0.0, 0.0, 2.0), &circle(1.0, 0.0, 1.0)).unwrap();
        assert_eq!(pts.len(), 1);
        assert_abs_diff_eq!(pts[0], Point2::new(2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn nearly_tangent_circles_still_cross_twice() {
        let pts = circle_circle(&circle(0.0, 0.0, 1.0), &circle(2.0 - 1e-12, 0.0, 1.0)).unwrap();
        assert_eq!(pts.len(), 2);
        assert_abs_diff_eq!(pts[0].x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[0].y, 1e-6, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[1].y, -1e-6, epsilon = 1e-9);
    }

    #[test]
    fn apart_nested_and_concentric() {
        assert!(circle_circle(&circle(0.0, 0.0, 1.0), &circle(5.0, 0.0, 1.0)).unwrap().is_empty());
        assert!(circle_circle(&circle(0.0, 0.0, 3.0), &circle(0.5, 0.0, 1.0)).unwrap().is_empty());
        assert!(circle_circle(&circle(0.0, 0.0, 3.0), &circle(0.0, 0.0, 1.0)).unwrap().is_empty());
        assert!(circle_circle(&circle(1.0, 1.0, 2.0), &circle(1.0, 1.0, 2.0)).unwrap_err().is_degenerate());
    }
}
