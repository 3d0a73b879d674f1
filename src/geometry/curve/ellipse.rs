use crate::error::{GeometryError, Result};
use crate::math::point_2d::{rotate_vec, scalar_close};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Circle, Curve, CurveDomain, Implicit};

/// A full ellipse in the plane.
///
/// Defined by a center, two semi-axis radii and a rotation (radians,
/// counter-clockwise) of the first axis from the x-axis. The parameter is
/// the eccentric angle:
///
/// `P(t) = center + R(rotation) * (r1 * cos(t), r2 * sin(t))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    center: Point2,
    r1: f64,
    r2: f64,
    rotation: f64,
}

impl Ellipse {
    /// Creates a new ellipse.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the ellipse
    /// * `r1` - Radius along the rotated x-axis (must be positive)
    /// * `r2` - Radius along the rotated y-axis (must be positive)
    /// * `rotation` - Rotation of the `r1` axis in radians
    ///
    /// # Errors
    ///
    /// Returns an error if either radius is non-positive or any input is not finite.
    pub fn new(center: Point2, r1: f64, r2: f64, rotation: f64) -> Result<Self> {
        for (name, r) in [("r1", r1), ("r2", r2)] {
            if !r.is_finite() || r < TOLERANCE {
                return Err(GeometryError::Degenerate(format!(
                    "ellipse radius {name} must be positive, got {r}"
                ))
                .into());
            }
        }
        if !center.x.is_finite() || !center.y.is_finite() || !rotation.is_finite() {
            return Err(GeometryError::Degenerate("ellipse input is not finite".into()).into());
        }
        Ok(Self {
            center,
            r1,
            r2,
            rotation,
        })
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the first semi-axis radius.
    #[must_use]
    pub fn r1(&self) -> f64 {
        self.r1
    }

    /// Returns the second semi-axis radius.
    #[must_use]
    pub fn r2(&self) -> f64 {
        self.r2
    }

    /// Returns the rotation in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns the equivalent circle when both radii are equal.
    #[must_use]
    pub fn as_circle(&self) -> Option<Circle> {
        if scalar_close(self.r1, self.r2) {
            Circle::new(self.center, self.r1).ok()
        } else {
            None
        }
    }

    /// Maps a world point into the frame where this ellipse is the unit circle.
    #[must_use]
    pub fn to_local(&self, p: &Point2) -> Point2 {
        let v = rotate_vec(&(p - self.center), -self.rotation);
        Point2::new(v.x / self.r1, v.y / self.r2)
    }

    /// Inverse of [`Ellipse::to_local`].
    #[must_use]
    pub fn from_local(&self, p: &Point2) -> Point2 {
        self.center + rotate_vec(&Vector2::new(p.x * self.r1, p.y * self.r2), self.rotation)
    }

    /// Point on the ellipse in the direction `theta` (radians) as seen from
    /// the center.
    #[must_use]
    pub fn point_at_polar(&self, theta: f64) -> Point2 {
        let (s, c) = (theta - self.rotation).sin_cos();
        let scale = 1.0 / ((c / self.r1).powi(2) + (s / self.r2).powi(2)).sqrt();
        self.center + rotate_vec(&Vector2::new(c * scale, s * scale), self.rotation)
    }

    /// The two points of tangency for lines through the external point `p`.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` lies inside the ellipse.
    pub fn tangent_points(&self, p: &Point2) -> Result<(Point2, Point2)> {
        let unit = Circle::new(Point2::origin(), 1.0)?;
        let (a, b) = unit.tangent_points(&self.to_local(p))?;
        Ok((self.from_local(&a), self.from_local(&b)))
    }
}

impl Curve for Ellipse {
    fn evaluate(&self, t: f64) -> Point2 {
        let (s, c) = t.sin_cos();
        self.from_local(&Point2::new(c, s))
    }

    fn derivative(&self, t: f64) -> Vector2 {
        let (s, c) = t.sin_cos();
        rotate_vec(&Vector2::new(-self.r1 * s, self.r2 * c), self.rotation)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl Implicit for Ellipse {
    /// `(x'/r1)^2 + (y'/r2)^2 - 1` in the ellipse's own frame.
    fn implicit_value(&self, x: f64, y: f64) -> f64 {
        self.to_local(&Point2::new(x, y)).coords.norm_squared() - 1.0
    }
}
