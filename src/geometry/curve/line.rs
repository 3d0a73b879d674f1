use std::f64::consts::PI;

use crate::error::{GeometryError, Result};
use crate::math::point_2d::{cross, midpoint};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain, Implicit};

/// Slope of a line. Vertical lines carry no numeric slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slope {
    /// `dy/dx` of a non-vertical line.
    Finite(f64),
    /// The line is parallel to the y-axis.
    Vertical,
}

impl Slope {
    /// Numeric slope, `+inf` for vertical lines.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Finite(m) => m,
            Self::Vertical => f64::INFINITY,
        }
    }
}

/// An infinite line through a reference point with a given slope.
///
/// Parametric form: `P(t) = point + t * direction` with a unit direction
/// pointing toward increasing x (increasing y for vertical lines).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    point: Point2,
    slope: Slope,
}

impl Line {
    /// Creates a line through `point` with slope `slope`.
    ///
    /// An infinite slope produces a vertical line.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is not finite or the slope is NaN.
    pub fn new(point: Point2, slope: f64) -> Result<Self> {
        check_point(&point)?;
        let slope = if slope.is_nan() {
            return Err(GeometryError::Degenerate("line slope is undefined".into()).into());
        } else if slope.is_infinite() {
            Slope::Vertical
        } else {
            Slope::Finite(slope)
        };
        Ok(Self { point, slope })
    }

    /// Creates the line `y = slope * x + intercept`.
    ///
    /// # Errors
    ///
    /// Returns an error unless both slope and intercept are finite.
    pub fn from_slope_intercept(slope: f64, intercept: f64) -> Result<Self> {
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "undefined slope-intercept combination ({slope}, {intercept})"
            ))
            .into());
        }
        Ok(Self {
            point: Point2::new(0.0, intercept),
            slope: Slope::Finite(slope),
        })
    }

    /// Creates the line through two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn from_points(p1: Point2, p2: Point2) -> Result<Self> {
        check_point(&p1)?;
        check_point(&p2)?;
        let dir = p2 - p1;
        if dir.norm() < TOLERANCE * p1.coords.norm().max(1.0) {
            return Err(GeometryError::Degenerate("line through coincident points".into()).into());
        }
        Self::from_direction(p1, dir)
    }

    /// Creates the line through `point` along `direction`.
    ///
    /// Directions within [`TOLERANCE`] of the y-axis produce a vertical line.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is zero-length or not finite.
    pub fn from_direction(point: Point2, direction: Vector2) -> Result<Self> {
        check_point(&point)?;
        let len = direction.norm();
        if !len.is_finite() {
            return Err(GeometryError::Degenerate("line direction is not finite".into()).into());
        }
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let slope = if direction.x.abs() <= TOLERANCE * len {
            Slope::Vertical
        } else {
            Slope::Finite(direction.y / direction.x)
        };
        Ok(Self { point, slope })
    }

    /// Creates the line `a*x + b*y = c`.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` and `b` are both zero.
    pub fn from_coefficients(a: f64, b: f64, c: f64) -> Result<Self> {
        let norm = a.hypot(b);
        if !norm.is_finite() || !c.is_finite() || norm < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "line coefficients ({a}, {b}, {c}) do not define a line"
            ))
            .into());
        }
        // Foot of the perpendicular from the origin.
        let point = Point2::new(a * c / (norm * norm), b * c / (norm * norm));
        Self::from_direction(point, Vector2::new(b, -a))
    }

    /// Creates the vertical line `x = x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is not finite.
    pub fn vertical(x: f64) -> Result<Self> {
        let point = Point2::new(x, 0.0);
        check_point(&point)?;
        Ok(Self {
            point,
            slope: Slope::Vertical,
        })
    }

    /// Creates the horizontal line `y = y`.
    ///
    /// # Errors
    ///
    /// Returns an error if `y` is not finite.
    pub fn horizontal(y: f64) -> Result<Self> {
        Self::from_slope_intercept(0.0, y)
    }

    /// Returns the reference point of the line.
    #[must_use]
    pub fn point(&self) -> &Point2 {
        &self.point
    }

    /// Returns the slope.
    #[must_use]
    pub fn slope(&self) -> Slope {
        self.slope
    }

    /// Returns true for vertical lines.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.slope == Slope::Vertical
    }

    /// Unit direction vector.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        match self.slope {
            Slope::Finite(m) => {
                let h = m.hypot(1.0);
                Vector2::new(1.0 / h, m / h)
            }
            Slope::Vertical => Vector2::new(0.0, 1.0),
        }
    }

    /// Coefficients `(a, b, c)` of `a*x + b*y = c`.
    #[must_use]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        match self.slope {
            Slope::Finite(m) => (-m, 1.0, self.point.y - m * self.point.x),
            Slope::Vertical => (1.0, 0.0, self.point.x),
        }
    }

    /// The y-intercept, `None` for vertical lines.
    #[must_use]
    pub fn intercept(&self) -> Option<f64> {
        self.y_at(0.0)
    }

    /// The x-intercept, `None` for horizontal lines.
    #[must_use]
    pub fn x_intercept(&self) -> Option<f64> {
        self.x_at(0.0)
    }

    /// The y value at `x`, `None` for vertical lines.
    #[must_use]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match self.slope {
            Slope::Finite(m) => Some(self.point.y + m * (x - self.point.x)),
            Slope::Vertical => None,
        }
    }

    /// The x value at `y`, `None` for horizontal lines.
    #[must_use]
    pub fn x_at(&self, y: f64) -> Option<f64> {
        match self.slope {
            Slope::Finite(m) if m.abs() < TOLERANCE => None,
            Slope::Finite(m) => Some(self.point.x + (y - self.point.y) / m),
            Slope::Vertical => Some(self.point.x),
        }
    }

    /// Perpendicular distance from `p` to the line.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        self.implicit_value(p.x, p.y).abs()
    }

    /// Orthogonal projection of `p` onto the line.
    #[must_use]
    pub fn project(&self, p: &Point2) -> Point2 {
        let d = self.direction();
        self.point + d * (p - self.point).dot(&d)
    }

    /// Mirror image of `p` across the line.
    #[must_use]
    pub fn reflect(&self, p: &Point2) -> Point2 {
        let foot = self.project(p);
        foot + (foot - p)
    }

    /// The line through `p` perpendicular to this one.
    #[must_use]
    pub fn perpendicular_through(&self, p: Point2) -> Self {
        let slope = match self.slope {
            Slope::Vertical => Slope::Finite(0.0),
            Slope::Finite(m) if m.abs() < TOLERANCE => Slope::Vertical,
            Slope::Finite(m) => Slope::Finite(-1.0 / m),
        };
        Self { point: p, slope }
    }

    /// The line through `p` parallel to this one.
    #[must_use]
    pub fn parallel_through(&self, p: Point2) -> Self {
        Self {
            point: p,
            slope: self.slope,
        }
    }

    /// Counter-clockwise angle from this line to `other`, in `[0, π)`.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f64 {
        let a = self.direction();
        let b = other.direction();
        let theta = cross(&a, &b).atan2(a.dot(&b)).rem_euclid(PI);
        if theta >= PI - TOLERANCE {
            0.0
        } else {
            theta
        }
    }

    /// Returns true if `other` is parallel to this line.
    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        cross(&self.direction(), &other.direction()).abs() < TOLERANCE
    }

    /// Returns true if both lines describe the same set of points.
    #[must_use]
    pub fn coincides_with(&self, other: &Self) -> bool {
        self.is_parallel(other)
            && self.distance_to(&other.point) <= TOLERANCE * other.point.coords.norm().max(1.0)
    }

    /// The two lines bisecting the angles between this line and `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines are parallel.
    pub fn bisectors(&self, other: &Self) -> Result<(Self, Self)> {
        if self.is_parallel(other) {
            return Err(GeometryError::Degenerate("parallel lines have no angle bisector".into()).into());
        }
        let (a1, b1, c1) = normalized_coefficients(self);
        let (a2, b2, c2) = normalized_coefficients(other);
        Ok((
            Self::from_coefficients(a1 + a2, b1 + b2, c1 + c2)?,
            Self::from_coefficients(a1 - a2, b1 - b2, c1 - c2)?,
        ))
    }

    /// The perpendicular bisector of the segment `p1`–`p2`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn perpendicular_bisector(p1: Point2, p2: Point2) -> Result<Self> {
        let chord = Self::from_points(p1, p2)?;
        Ok(chord.perpendicular_through(midpoint(&p1, &p2)))
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Point2 {
        self.point + self.direction() * t
    }

    fn derivative(&self, _t: f64) -> Vector2 {
        self.direction()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl Implicit for Line {
    /// Signed distance; positive on the left of the direction vector.
    fn implicit_value(&self, x: f64, y: f64) -> f64 {
        cross(&self.direction(), &(Point2::new(x, y) - self.point))
    }
}

fn normalized_coefficients(line: &Line) -> (f64, f64, f64) {
    let (a, b, c) = line.coefficients();
    let n = a.hypot(b);
    (a / n, b / n, c / n)
}

fn check_point(p: &Point2) -> Result<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::Degenerate(format!("point ({}, {}) is not finite", p.x, p.y)).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn infinite_slope_is_vertical() {
        let l = Line::new(Point2::new(2.0, 5.0), f64::INFINITY).unwrap();
        assert!(l.is_vertical());
        assert_eq!(l.y_at(1.0), None);
        assert_eq!(l.x_at(-3.0), Some(2.0));
        assert_eq!(l.slope().value(), f64::INFINITY);
    }

    #[test]
    fn steep_slope_keeps_unit_direction() {
        let l = Line::new(Point2::new(1.0, 0.0), 1e200).unwrap();
        let d = l.direction();
        assert_abs_diff_eq!(d.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.y, 1.0, epsilon = 1e-12);
        assert!(d.x > 0.0);
        assert!(!l.is_parallel(&Line::horizontal(5.0).unwrap()));
    }

    #[test]
    fn nan_slope_rejected() {
        assert!(Line::new(Point2::origin(), f64::NAN).unwrap_err().is_degenerate());
    }

    #[test]
    fn infinite_intercept_rejected() {
        assert!(Line::from_slope_intercept(1.0, f64::INFINITY)
            .unwrap_err()
            .is_degenerate());
    }

    #[test]
    fn coincident_points_rejected() {
        let p = Point2::new(1.0, 1.0);
        assert!(Line::from_points(p, p).unwrap_err().is_degenerate());
    }

    #[test]
    fn from_points_slope_and_intercept() {
        let l = Line::from_points(Point2::new(1.0, 3.0), Point2::new(3.0, 7.0)).unwrap();
        assert_eq!(l.slope(), Slope::Finite(2.0));
        assert_abs_diff_eq!(l.intercept().unwrap(), 1.0);
        assert_abs_diff_eq!(l.x_intercept().unwrap(), -0.5);
    }

    #[test]
    fn coefficients_roundtrip_through_constructor() {
        let l = Line::from_coefficients(1.0, 1.0, 2.0).unwrap();
        assert_abs_diff_eq!(l.y_at(0.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(l.y_at(2.0).unwrap(), 0.0, epsilon = 1e-12);
        let v = Line::from_coefficients(2.0, 0.0, 4.0).unwrap();
        assert!(v.is_vertical());
        assert_abs_diff_eq!(v.x_at(9.0).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn implicit_value_is_signed_distance() {
        let l = Line::horizontal(1.0).unwrap();
        assert_abs_diff_eq!(l.implicit_value(5.0, 4.0), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(l.implicit_value(5.0, -1.0), -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(l.distance_to(&Point2::new(0.0, -1.0)), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn reflect_and_project() {
        let l = Line::from_slope_intercept(1.0, 0.0).unwrap();
        let p = Point2::new(2.0, 0.0);
        assert_abs_diff_eq!(l.project(&p), Point2::new(1.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(l.reflect(&p), Point2::new(0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn perpendicular_swaps_horizontal_and_vertical() {
        let h = Line::horizontal(3.0).unwrap();
        let n = h.perpendicular_through(Point2::new(1.0, 3.0));
        assert!(n.is_vertical());
        let back = n.perpendicular_through(Point2::new(1.0, 3.0));
        assert_eq!(back.slope(), Slope::Finite(0.0));
        let d = Line::from_slope_intercept(2.0, 0.0).unwrap();
        assert_eq!(d.perpendicular_through(Point2::origin()).slope(), Slope::Finite(-0.5));
    }

    #[test]
    fn angle_between_lines() {
        let a = Line::horizontal(0.0).unwrap();
        let b = Line::from_slope_intercept(1.0, 0.0).unwrap();
        assert_abs_diff_eq!(a.angle_to(&b), FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(a.angle_to(&a), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn bisectors_of_axes() {
        let x_axis = Line::horizontal(0.0).unwrap();
        let y_axis = Line::vertical(0.0).unwrap();
        let (b1, b2) = x_axis.bisectors(&y_axis).unwrap();
        let mut slopes = [b1.slope().value(), b2.slope().value()];
        slopes.sort_by(f64::total_cmp);
        assert_abs_diff_eq!(slopes[0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(slopes[1], 1.0, epsilon = 1e-12);
        assert!(x_axis.bisectors(&Line::horizontal(2.0).unwrap()).is_err());
    }

    #[test]
    fn perpendicular_bisector_of_points() {
        let l = Line::perpendicular_bisector(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)).unwrap();
        assert!(l.is_vertical());
        assert_abs_diff_eq!(l.point().x, 1.0);
    }

    #[test]
    fn coincident_detection() {
        let a = Line::from_slope_intercept(2.0, 1.0).unwrap();
        let b = Line::new(Point2::new(1.0, 3.0), 2.0).unwrap();
        assert!(a.coincides_with(&b));
        assert!(!a.coincides_with(&a.parallel_through(Point2::origin())));
    }
}
