use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::point_2d::{distance, midpoint, points_close};
use crate::math::{Point2, Vector2};

use super::{Curve, CurveDomain, Line};

/// A finite line segment between two distinct endpoints.
///
/// `P(t) = start + t * (end - start)` for `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point2,
    end: Point2,
}

impl Segment {
    /// Creates a segment between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide or are not finite.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        let finite = [start.x, start.y, end.x, end.y].iter().all(|v| v.is_finite());
        if !finite {
            return Err(GeometryError::Degenerate("segment endpoint is not finite".into()).into());
        }
        if points_close(&start, &end) {
            return Err(GeometryError::Degenerate("segment endpoints coincide".into()).into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        midpoint(&self.start, &self.end)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// The infinite line containing the segment.
    ///
    /// # Errors
    ///
    /// Does not fail for a constructed segment; the `Result` mirrors
    /// [`Line::from_points`].
    pub fn to_line(&self) -> Result<Line> {
        Line::from_points(self.start, self.end)
    }

    /// Bounded intersection with another segment, endpoints included.
    #[must_use]
    pub fn intersect_segment(&self, other: &Self) -> Option<Point2> {
        segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end).map(|(p, _, _)| p)
    }
}

impl Curve for Segment {
    fn evaluate(&self, t: f64) -> Point2 {
        self.start + (self.end - self.start) * t
    }

    fn derivative(&self, _t: f64) -> Vector2 {
        self.end - self.start
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn midpoint_and_length() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(6.0, 8.0)).unwrap();
        assert_abs_diff_eq!(s.midpoint(), Point2::new(3.0, 4.0));
        assert_abs_diff_eq!(s.length(), 10.0);
        assert_abs_diff_eq!(s.evaluate(0.25), Point2::new(1.5, 2.0));
    }

    #[test]
    fn coincident_endpoints_rejected() {
        let p = Point2::new(2.0, 2.0);
        assert!(Segment::new(p, p).unwrap_err().is_degenerate());
    }

    #[test]
    fn crossing_segments() {
        let a = Segment::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)).unwrap();
        let b = Segment::new(Point2::new(0.0, 2.0), Point2::new(2.0, 0.0)).unwrap();
        assert_abs_diff_eq!(a.intersect_segment(&b).unwrap(), Point2::new(1.0, 1.0), epsilon = 1e-12);
        let c = Segment::new(Point2::new(3.0, 0.0), Point2::new(3.0, 1.0)).unwrap();
        assert!(a.intersect_segment(&c).is_none());
    }
}
