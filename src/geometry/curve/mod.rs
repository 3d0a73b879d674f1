mod arc;
mod bezier;
mod circle;
mod ellipse;
mod function;
mod line;
mod segment;

pub use arc::Arc;
pub use bezier::Bezier;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use function::Function;
pub use line::{Line, Slope};
pub use segment::Segment;

use crate::math::{Point2, Vector2};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns true if both ends of the domain are finite.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.t_min.is_finite() && self.t_max.is_finite()
    }
}

/// Trait for parametric curves in the plane.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point2;

    /// First derivative `dP/dt` at parameter `t`.
    fn derivative(&self, t: f64) -> Vector2;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}

/// Shapes that can be written as `F(x, y) = 0`.
///
/// The sign of the value tells which side of the shape a point lies on;
/// it is negative inside closed shapes.
pub trait Implicit {
    /// Evaluates `F(x, y)`.
    fn implicit_value(&self, x: f64, y: f64) -> f64;
}
