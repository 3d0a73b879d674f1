use crate::error::{GeometryError, Result};
use crate::math::point_2d::points_close;
use crate::math::{Point2, Vector2};

use super::curve::{Bezier, Curve, CurveDomain};

/// A path of Bezier segments joined end to start.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSpline {
    segments: Vec<Bezier>,
}

impl BezierSpline {
    /// Creates a spline from contiguous segments.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no segments or a segment does not
    /// start where the previous one ends.
    pub fn new(segments: Vec<Bezier>) -> Result<Self> {
        if segments.is_empty() {
            return Err(GeometryError::Degenerate("spline has no segments".into()).into());
        }
        for (i, pair) in segments.windows(2).enumerate() {
            if !points_close(&pair[0].end(), &pair[1].start()) {
                return Err(GeometryError::Degenerate(format!(
                    "spline segment {} does not start where segment {i} ends",
                    i + 1
                ))
                .into());
            }
        }
        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[Bezier] {
        &self.segments
    }

    /// The points the spline passes through: each segment start, then the
    /// final end point unless the spline is closed.
    #[must_use]
    pub fn knots(&self) -> Vec<Point2> {
        let mut knots: Vec<Point2> = self.segments.iter().map(Bezier::start).collect();
        if !self.is_closed() {
            if let Some(last) = self.segments.last() {
                knots.push(last.end());
            }
        }
        knots
    }

    /// Segment index and local parameter for a global `t` in `[0, 1]`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn locate(&self, t: f64) -> (usize, f64) {
        let n = self.segments.len();
        let u = t.clamp(0.0, 1.0) * n as f64;
        let i = (u.floor() as usize).min(n - 1);
        (i, u - i as f64)
    }
}

impl Curve for BezierSpline {
    /// Each segment covers an equal share of the global parameter.
    fn evaluate(&self, t: f64) -> Point2 {
        let (i, u) = self.locate(t);
        self.segments[i].evaluate(u)
    }

    #[allow(clippy::cast_precision_loss)]
    fn derivative(&self, t: f64) -> Vector2 {
        let (i, u) = self.locate(t);
        self.segments[i].derivative(u) * self.segments.len() as f64
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => points_close(&first.start(), &last.end()),
            _ => false,
        }
    }
}
