use crate::error::{GeometryError, Result};
use crate::math::point_2d::points_close;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// Number of samples used when measuring arc length for equal spacing.
const LENGTH_SAMPLES: usize = 256;

/// A quadratic or cubic Bezier curve over `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bezier {
    Quadratic([Point2; 3]),
    Cubic([Point2; 4]),
}

impl Bezier {
    /// Creates a curve from 3 (quadratic) or 4 (cubic) control points.
    ///
    /// # Errors
    ///
    /// Returns an error for any other number of points, non-finite
    /// coordinates, or when every control point coincides.
    pub fn new(points: &[Point2]) -> Result<Self> {
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::Degenerate("bezier control point is not finite".into()).into());
        }
        let curve = match *points {
            [p0, p1, p2] => Self::Quadratic([p0, p1, p2]),
            [p0, p1, p2, p3] => Self::Cubic([p0, p1, p2, p3]),
            _ => {
                return Err(GeometryError::Degenerate(format!(
                    "bezier needs 3 or 4 control points, got {}",
                    points.len()
                ))
                .into())
            }
        };
        if points.iter().all(|p| points_close(p, &points[0])) {
            return Err(GeometryError::Degenerate("bezier control points coincide".into()).into());
        }
        Ok(curve)
    }

    /// Creates a quadratic curve.
    ///
    /// # Errors
    ///
    /// See [`Bezier::new`].
    pub fn quadratic(p0: Point2, p1: Point2, p2: Point2) -> Result<Self> {
        Self::new(&[p0, p1, p2])
    }

    /// Creates a cubic curve.
    ///
    /// # Errors
    ///
    /// See [`Bezier::new`].
    pub fn cubic(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Result<Self> {
        Self::new(&[p0, p1, p2, p3])
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        match self {
            Self::Quadratic(p) => p,
            Self::Cubic(p) => p,
        }
    }

    /// Returns the polynomial degree (2 or 3).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.control_points().len() - 1
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        self.control_points()[0]
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        let p = self.control_points();
        p[p.len() - 1]
    }

    /// Direction angle of the tangent at `t`, in radians.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the derivative vanishes.
    pub fn tangent_angle(&self, t: f64) -> Result<f64> {
        let d = self.derivative(t);
        if d.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d.y.atan2(d.x))
    }

    /// Splits the curve at `t` with de Casteljau's algorithm.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        match self {
            Self::Quadratic([p0, p1, p2]) => {
                let a = p0.lerp(p1, t);
                let b = p1.lerp(p2, t);
                let m = a.lerp(&b, t);
                (Self::Quadratic([*p0, a, m]), Self::Quadratic([m, b, *p2]))
            }
            Self::Cubic([p0, p1, p2, p3]) => {
                let a = p0.lerp(p1, t);
                let b = p1.lerp(p2, t);
                let c = p2.lerp(p3, t);
                let ab = a.lerp(&b, t);
                let bc = b.lerp(&c, t);
                let m = ab.lerp(&bc, t);
                (Self::Cubic([*p0, a, ab, m]), Self::Cubic([m, bc, c, *p3]))
            }
        }
    }

    /// Axis-aligned bounding box of the control polygon, which contains the curve.
    #[must_use]
    pub fn bounding_box(&self) -> (Point2, Point2) {
        let pts = self.control_points();
        let mut min = pts[0];
        let mut max = pts[0];
        for p in &pts[1..] {
            min = Point2::new(min.x.min(p.x), min.y.min(p.y));
            max = Point2::new(max.x.max(p.x), max.y.max(p.y));
        }
        (min, max)
    }

    /// Approximate arc length from `samples` chords.
    #[must_use]
    pub fn length(&self, samples: usize) -> f64 {
        self.cumulative_lengths(samples.max(1))
            .last()
            .copied()
            .unwrap_or(0.0)
    }

    /// Parameters that split the curve into `pieces` pieces of (approximately)
    /// equal arc length, including 0 and 1.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn equal_spaced_t(&self, pieces: usize) -> Vec<f64> {
        let pieces = pieces.max(1);
        let cumulative = self.cumulative_lengths(LENGTH_SAMPLES);
        let total = cumulative[LENGTH_SAMPLES];
        let mut ts = Vec::with_capacity(pieces + 1);
        ts.push(0.0);
        let mut k = 0;
        for i in 1..pieces {
            let target = total * i as f64 / pieces as f64;
            while k < LENGTH_SAMPLES - 1 && cumulative[k + 1] < target {
                k += 1;
            }
            let span = cumulative[k + 1] - cumulative[k];
            let frac = if span > 0.0 {
                (target - cumulative[k]) / span
            } else {
                0.0
            };
            ts.push((k as f64 + frac) / LENGTH_SAMPLES as f64);
        }
        ts.push(1.0);
        ts
    }

    /// Points at [`Bezier::equal_spaced_t`].
    #[must_use]
    pub fn equal_spaced_points(&self, pieces: usize) -> Vec<Point2> {
        self.equal_spaced_t(pieces)
            .into_iter()
            .map(|t| self.evaluate(t))
            .collect()
    }

    #[allow(clippy::cast_precision_loss)]
    fn cumulative_lengths(&self, samples: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(samples + 1);
        let mut acc = 0.0;
        let mut prev = self.start();
        out.push(0.0);
        for i in 1..=samples {
            let p = self.evaluate(i as f64 / samples as f64);
            acc += (p - prev).norm();
            out.push(acc);
            prev = p;
        }
        out
    }
}

impl Curve for Bezier {
    fn evaluate(&self, t: f64) -> Point2 {
        let s = 1.0 - t;
        match self {
            Self::Quadratic([p0, p1, p2]) => Point2::from(
                p0.coords * (s * s) + p1.coords * (2.0 * s * t) + p2.coords * (t * t),
            ),
            Self::Cubic([p0, p1, p2, p3]) => Point2::from(
                p0.coords * (s * s * s)
                    + p1.coords * (3.0 * s * s * t)
                    + p2.coords * (3.0 * s * t * t)
                    + p3.coords * (t * t * t),
            ),
        }
    }

    fn derivative(&self, t: f64) -> Vector2 {
        let s = 1.0 - t;
        match self {
            Self::Quadratic([p0, p1, p2]) => ((p1 - p0) * s + (p2 - p1) * t) * 2.0,
            Self::Cubic([p0, p1, p2, p3]) => {
                ((p1 - p0) * (s * s) + (p2 - p1) * (2.0 * s * t) + (p3 - p2) * (t * t)) * 3.0
            }
        }
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        points_close(&self.start(), &self.end())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn arch() -> Bezier {
        Bezier::cubic(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn endpoints_and_midpoint() {
        let b = arch();
        assert_abs_diff_eq!(b.evaluate(0.0), Point2::new(0.0, 0.0));
        assert_abs_diff_eq!(b.evaluate(1.0), Point2::new(1.0, 0.0));
        assert_abs_diff_eq!(b.evaluate(0.5), Point2::new(0.5, 0.75), epsilon = 1e-12);
    }

    #[test]
    fn cubic_derivative() {
        let b = arch();
        assert_abs_diff_eq!(b.derivative(0.0), Vector2::new(0.0, 3.0), epsilon = 1e-12);
        assert_abs_diff_eq!(b.derivative(0.5), Vector2::new(1.5, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(b.tangent_angle(0.5).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_evaluate() {
        let b = Bezier::quadratic(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 0.0),
        )
        .unwrap();
        assert_eq!(b.degree(), 2);
        assert_abs_diff_eq!(b.evaluate(0.5), Point2::new(1.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(b.derivative(0.5), Vector2::new(2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn split_halves_agree() {
        let b = arch();
        let (l, r) = b.split(0.3);
        assert_abs_diff_eq!(l.end(), b.evaluate(0.3), epsilon = 1e-12);
        assert_abs_diff_eq!(l.evaluate(0.5), b.evaluate(0.15), epsilon = 1e-12);
        assert_abs_diff_eq!(r.evaluate(0.5), b.evaluate(0.65), epsilon = 1e-12);
    }

    #[test]
    fn bounding_box_of_control_polygon() {
        let (min, max) = arch().bounding_box();
        assert_abs_diff_eq!(min, Point2::new(0.0, 0.0));
        assert_abs_diff_eq!(max, Point2::new(1.0, 1.0));
    }

    #[test]
    fn straight_curve_length_and_spacing() {
        let b = Bezier::cubic(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(b.length(16), 3.0, epsilon = 1e-12);
        let pts = b.equal_spaced_points(3);
        assert_eq!(pts.len(), 4);
        assert_abs_diff_eq!(pts[1].x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[2].x, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_bad_control_points() {
        assert!(Bezier::new(&[Point2::origin(); 2]).unwrap_err().is_degenerate());
        assert!(Bezier::new(&[Point2::origin(); 4]).is_err());
    }
}
