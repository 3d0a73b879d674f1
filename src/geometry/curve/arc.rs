use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::angle_2d::{angle_diff, angle_isbetween, normalize};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Circle, Curve, CurveDomain};

/// A circular arc swept counter-clockwise from `theta1` to `theta2`.
///
/// Angles are in radians. The parameter is the polar angle about the
/// center, running over `[theta1, theta1 + sweep]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    circle: Circle,
    theta1: f64,
    theta2: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the supporting circle
    /// * `radius` - Radius (must be positive)
    /// * `theta1` - Start angle in radians
    /// * `theta2` - End angle in radians, reached counter-clockwise
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, an angle is not
    /// finite, or the angles describe no sweep or a full turn.
    pub fn new(center: Point2, radius: f64, theta1: f64, theta2: f64) -> Result<Self> {
        Self::from_circle(Circle::new(center, radius)?, theta1, theta2)
    }

    /// Creates the arc of `circle` from `theta1` to `theta2`.
    ///
    /// # Errors
    ///
    /// Same as [`Arc::new`], minus the radius check.
    pub fn from_circle(circle: Circle, theta1: f64, theta2: f64) -> Result<Self> {
        if !theta1.is_finite() || !theta2.is_finite() {
            return Err(GeometryError::Degenerate(format!("arc angles ({theta1}, {theta2}) are not finite")).into());
        }
        let sweep = angle_diff(theta1, theta2);
        if sweep < TOLERANCE || sweep > TAU - TOLERANCE {
            return Err(GeometryError::Degenerate("arc has no sweep; use a circle for a full turn".into()).into());
        }
        Ok(Self { circle, theta1, theta2 })
    }

    /// Returns the center of the supporting circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        self.circle.center()
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.circle.radius()
    }

    /// Returns the full circle the arc lies on.
    #[must_use]
    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    #[must_use]
    pub fn theta1(&self) -> f64 {
        self.theta1
    }

    #[must_use]
    pub fn theta2(&self) -> f64 {
        self.theta2
    }

    /// Counter-clockwise sweep from `theta1` to `theta2`, in `(0, 2π)`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        angle_diff(self.theta1, self.theta2)
    }

    /// Angle halfway along the sweep, in `[0, 2π)`.
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        normalize(self.theta1 + 0.5 * self.sweep())
    }

    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.circle.evaluate(self.theta1)
    }

    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.circle.evaluate(self.theta2)
    }

    /// Arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius() * self.sweep()
    }

    /// Returns true if the polar angle `theta` falls on the sweep.
    ///
    /// The end angles are included with a tolerance of [`TOLERANCE`] radians.
    #[must_use]
    pub fn contains_angle(&self, theta: f64) -> bool {
        angle_isbetween(theta, self.theta1, self.theta2)
            || angle_diff(theta, self.theta1) <= TOLERANCE
            || angle_diff(self.theta2, theta) <= TOLERANCE
    }

    /// Returns true if the direction of `p` from the center falls on the sweep.
    ///
    /// Only the angle is checked; `p` is assumed to lie on the supporting circle.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        let rel = p - self.center();
        self.contains_angle(rel.y.atan2(rel.x))
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Point2 {
        self.circle.evaluate(t)
    }

    fn derivative(&self, t: f64) -> Vector2 {
        self.circle.derivative(t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.theta1, self.theta1 + self.sweep())
    }

    fn is_closed(&self) -> bool {
        false
    }
}
