use crate::error::{GeometryError, Result, SolveError};
use crate::math::point_2d::cross;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain, Implicit};

/// A full circle in the plane.
///
/// The parametric domain is `[0, 2*pi)` and the curve is always closed.
///
/// `P(t) = center + radius * (cos(t), sin(t))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or either input is not finite.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!("circle radius must be positive, got {radius}")).into());
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(GeometryError::Degenerate("circle center is not finite".into()).into());
        }
        Ok(Self { center, radius })
    }

    /// Creates the circle through three points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear or two of them coincide.
    pub fn from_three_points(p1: Point2, p2: Point2, p3: Point2) -> Result<Self> {
        let a = p2 - p1;
        let b = p3 - p1;
        let d = 2.0 * cross(&a, &b);
        if d.abs() < TOLERANCE * a.norm() * b.norm() || d == 0.0 {
            return Err(GeometryError::Degenerate("points are collinear".into()).into());
        }
        let a2 = a.norm_squared();
        let b2 = b.norm_squared();
        let offset = Vector2::new(b.y * a2 - a.y * b2, a.x * b2 - b.x * a2) / d;
        Self::new(p1 + offset, offset.norm())
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The two points of tangency for lines through the external point `p`.
    ///
    /// Both points are `p` itself when it lies on the circle. The first
    /// point is reached counter-clockwise from the direction of `p`.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NoSolution`] if `p` lies inside the circle.
    pub fn tangent_points(&self, p: &Point2) -> Result<(Point2, Point2)> {
        let rel = p - self.center;
        let r2 = self.radius * self.radius;
        let d2 = rel.norm_squared();
        if (d2 - r2).abs() <= TOLERANCE * r2.max(1.0) {
            return Ok((*p, *p));
        }
        if d2 < r2 {
            return Err(SolveError::NoSolution("point is inside the circle; no tangent".into()).into());
        }
        let along = rel * (r2 / d2);
        let perp = Vector2::new(-rel.y, rel.x) * (self.radius * (d2 - r2).sqrt() / d2);
        Ok((self.center + along + perp, self.center + along - perp))
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Point2 {
        let (s, c) = t.sin_cos();
        self.center + Vector2::new(c, s) * self.radius
    }

    fn derivative(&self, t: f64) -> Vector2 {
        let (s, c) = t.sin_cos();
        Vector2::new(-s, c) * self.radius
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl Implicit for Circle {
    /// Signed distance to the circle; negative inside.
    fn implicit_value(&self, x: f64, y: f64) -> f64 {
        (x - self.center.x).hypot(y - self.center.y) - self.radius
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn unit() -> Circle {
        Circle::new(Point2::origin(), 1.0).unwrap()
    }

    #[test]
    fn evaluate_at_zero() {
        let c = Circle::new(Point2::origin(), 2.0).unwrap();
        assert_abs_diff_eq!(c.evaluate(0.0), Point2::new(2.0, 0.0));
    }

    #[test]
    fn evaluate_at_pi_over_2() {
        let c = Circle::new(Point2::origin(), 3.0).unwrap();
        assert_abs_diff_eq!(c.evaluate(FRAC_PI_2), Point2::new(0.0, 3.0), epsilon = 1e-9);
    }

    #[test]
    fn derivative_at_zero_points_up() {
        assert_abs_diff_eq!(unit().derivative(0.0), Vector2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn domain_is_full_circle() {
        let d = unit().domain();
        assert_abs_diff_eq!(d.t_min, 0.0);
        assert_abs_diff_eq!(d.t_max, TAU);
        assert!(unit().is_closed());
    }

    #[test]
    fn invalid_radius() {
        assert!(Circle::new(Point2::origin(), 0.0).unwrap_err().is_degenerate());
        assert!(Circle::new(Point2::origin(), -1.0).unwrap_err().is_degenerate());
    }

    #[test]
    fn implicit_sign() {
        let c = unit();
        assert!(c.implicit_value(0.0, 0.0) < 0.0);
        assert!(c.implicit_value(2.0, 0.0) > 0.0);
        assert_abs_diff_eq!(c.implicit_value(0.6, 0.8), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn through_three_points() {
        let c = Circle::from_three_points(
            Point2::new(1.0, 0.0),
            Point2::new(-1.0, 0.0),
            Point2::new(0.0, 1.0),
        )
        .unwrap();
        assert_abs_diff_eq!(*c.center(), Point2::origin(), epsilon = 1e-12);
        assert_abs_diff_eq!(c.radius(), 1.0, epsilon = 1e-12);
        assert!(Circle::from_three_points(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0)
        )
        .is_err());
    }

    #[test]
    fn tangent_points_from_outside() {
        let (a, b) = unit().tangent_points(&Point2::new(2.0, 0.0)).unwrap();
        assert_abs_diff_eq!(a, Point2::new(0.5, 0.75_f64.sqrt()), epsilon = 1e-12);
        assert_abs_diff_eq!(b, Point2::new(0.5, -(0.75_f64.sqrt())), epsilon = 1e-12);
        assert!(unit().tangent_points(&Point2::new(0.1, 0.0)).is_err());
    }
}
