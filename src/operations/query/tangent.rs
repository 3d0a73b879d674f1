use crate::error::{GeometryError, Result};
use crate::geometry::{Curve, Line, Shape};
use crate::math::point_2d::points_close;
use crate::math::Point2;

/// Builds the tangent line of a shape at a parameter.
///
/// The parameter is the angle for circles and arcs, the eccentric angle for
/// ellipses, `x` for functions and `t` in `[0, 1]` for Bezier curves. The
/// tangent of a line is the line itself.
#[derive(Debug, Clone)]
pub struct TangentAt {
    shape: Shape,
    param: f64,
}

impl TangentAt {
    #[must_use]
    pub fn new(shape: impl Into<Shape>, param: f64) -> Self {
        Self {
            shape: shape.into(),
            param,
        }
    }

    /// Executes the construction, returning the tangent line.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::ParameterOutOfRange`] for a Bezier parameter
    ///   outside `[0, 1]` or an angle off an arc's sweep.
    /// - [`GeometryError::ZeroVector`] if the derivative vanishes.
    /// - [`GeometryError::Degenerate`] if the point or slope is not finite.
    pub fn execute(&self) -> Result<Line> {
        Ok(tangent_with_point(&self.shape, self.param)?.1)
    }
}

/// Builds the normal line of a shape at a parameter.
///
/// Parameters are read as in [`TangentAt`].
#[derive(Debug, Clone)]
pub struct NormalAt {
    shape: Shape,
    param: f64,
}

impl NormalAt {
    #[must_use]
    pub fn new(shape: impl Into<Shape>, param: f64) -> Self {
        Self {
            shape: shape.into(),
            param,
        }
    }

    /// Executes the construction, returning the normal line.
    ///
    /// # Errors
    ///
    /// Same as [`TangentAt::execute`].
    pub fn execute(&self) -> Result<Line> {
        let (point, tangent) = tangent_with_point(&self.shape, self.param)?;
        Ok(tangent.perpendicular_through(point))
    }
}

/// The two lines through an external point tangent to a circle or ellipse.
#[derive(Debug, Clone)]
pub struct TangentsThrough {
    shape: Shape,
    point: Point2,
}

impl TangentsThrough {
    #[must_use]
    pub fn new(shape: impl Into<Shape>, point: Point2) -> Self {
        Self {
            shape: shape.into(),
            point,
        }
    }

    /// Executes the construction, returning both tangent lines.
    ///
    /// A point on the shape yields its tangent line twice.
    ///
    /// # Errors
    ///
    /// - [`SolveError::NoSolution`](crate::error::SolveError::NoSolution)
    ///   if the point lies inside the shape.
    /// - [`GeometryError::Degenerate`] for shapes other than circles and
    ///   ellipses.
    pub fn execute(&self) -> Result<(Line, Line)> {
        let p = self.point;
        let (a, b) = match &self.shape {
            Shape::Circle(c) => c.tangent_points(&p)?,
            Shape::Ellipse(e) => e.tangent_points(&p)?,
            other => {
                return Err(GeometryError::Degenerate(format!(
                    "tangents through a point need a circle or ellipse, got {:?}",
                    other.kind()
                ))
                .into())
            }
        };
        if points_close(&a, &p) {
            let angle = match &self.shape {
                Shape::Ellipse(e) => {
                    let local = e.to_local(&p);
                    local.y.atan2(local.x)
                }
                Shape::Circle(c) => (p - c.center()).y.atan2((p - c.center()).x),
                _ => 0.0,
            };
            let line = tangent_with_point(&self.shape, angle)?.1;
            return Ok((line, line));
        }
        Ok((Line::from_points(p, a)?, Line::from_points(p, b)?))
    }
}

/// Point on the shape at `param` and the tangent line through it.
fn tangent_with_point(shape: &Shape, param: f64) -> Result<(Point2, Line)> {
    match shape {
        Shape::Line(l) => Ok((l.evaluate(param), *l)),
        Shape::Function(f) => {
            let point = f.evaluate(param);
            let slope = f.slope_at(param);
            if !point.y.is_finite() || !slope.is_finite() {
                return Err(GeometryError::Degenerate(format!("function has no finite slope at x = {param}")).into());
            }
            Ok((point, Line::new(point, slope)?))
        }
        Shape::Bezier(_) if !(0.0..=1.0).contains(&param) => Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: param,
            min: 0.0,
            max: 1.0,
        }
        .into()),
        Shape::Arc(arc) if !arc.contains_angle(param) => Err(GeometryError::ParameterOutOfRange {
            parameter: "theta",
            value: param,
            min: arc.theta1(),
            max: arc.theta1() + arc.sweep(),
        }
        .into()),
        _ => {
            let point = shape.evaluate(param);
            Ok((point, Line::from_direction(point, shape.derivative(param))?))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc, Bezier, Circle, Ellipse, Function, Slope};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn unit_circle() -> Circle {
        Circle::new(Point2::origin(), 1.0).unwrap()
    }

    #[test]
    fn circle_tangent_at_zero_is_vertical() {
        let t = TangentAt::new(unit_circle(), 0.0).execute().unwrap();
        assert!(t.is_vertical());
        assert_abs_diff_eq!(t.point().x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn circle_tangent_at_right_angle_is_horizontal() {
        let t = TangentAt::new(unit_circle(), FRAC_PI_2).execute().unwrap();
        assert_abs_diff_eq!(t.slope().value(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.y_at(0.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normals_swap_orientation() {
        let n = NormalAt::new(unit_circle(), 0.0).execute().unwrap();
        assert_eq!(n.slope(), Slope::Finite(0.0));
        let n = NormalAt::new(unit_circle(), FRAC_PI_2).execute().unwrap();
        assert!(n.is_vertical());
        assert_abs_diff_eq!(n.point().x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn normal_slope_is_negative_reciprocal() {
        let f = Function::new(|x| x * x);
        let t = TangentAt::new(f.clone(), 1.0).execute().unwrap();
        let n = NormalAt::new(f, 1.0).execute().unwrap();
        assert_abs_diff_eq!(t.slope().value(), 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(n.slope().value(), -0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(n.y_at(1.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn ellipse_tangent_touches() {
        let e = Ellipse::new(Point2::origin(), 2.0, 1.0, 0.0).unwrap();
        let t = TangentAt::new(e, FRAC_PI_4).execute().unwrap();
        let p = e.evaluate(FRAC_PI_4);
        assert_abs_diff_eq!(t.distance_to(&p), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.slope().value(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn bezier_parameter_range() {
        let b = Bezier::quadratic(Point2::origin(), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)).unwrap();
        let t = TangentAt::new(b, 0.5).execute().unwrap();
        assert_abs_diff_eq!(t.slope().value(), 0.0, epsilon = 1e-12);
        assert!(TangentAt::new(b, 1.5).execute().is_err());
    }

    #[test]
    fn arc_tangent_only_on_sweep() {
        let arc = Arc::new(Point2::origin(), 1.0, 0.0, FRAC_PI_2).unwrap();
        let t = TangentAt::new(arc, FRAC_PI_4).execute().unwrap();
        assert_abs_diff_eq!(t.slope().value(), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.distance_to(&Point2::origin()), 1.0, epsilon = 1e-12);

        let err = TangentAt::new(arc, -FRAC_PI_4).execute().unwrap_err();
        assert!(matches!(
            err,
            crate::PlotgeomError::Geometry(GeometryError::ParameterOutOfRange { .. })
        ));
    }

    #[test]
    fn tangents_through_external_point() {
        let (a, b) = TangentsThrough::new(unit_circle(), Point2::new(2.0, 0.0)).execute().unwrap();
        let expected = 1.0 / 3.0_f64.sqrt();
        assert_abs_diff_eq!(a.slope().value().abs(), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(b.slope().value().abs(), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(a.distance_to(&Point2::origin()), 1.0, epsilon = 1e-12);

        let err = TangentsThrough::new(unit_circle(), Point2::new(0.5, 0.0)).execute().unwrap_err();
        assert!(err.is_no_intersection());
    }

    #[test]
    fn tangents_through_point_on_circle() {
        let (a, b) = TangentsThrough::new(unit_circle(), Point2::new(0.0, 1.0)).execute().unwrap();
        assert_eq!(a, b);
        assert_abs_diff_eq!(a.slope().value(), 0.0, epsilon = 1e-12);
    }
}
