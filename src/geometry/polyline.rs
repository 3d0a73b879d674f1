use crate::math::Point2;

/// An ordered run of points, open or closed.
///
/// A closed polyline does not repeat its first point at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point2>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

impl Polyline {
    #[must_use]
    pub fn new(points: Vec<Point2>, closed: bool) -> Self {
        Self { points, closed }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length, including the closing edge of a closed polyline.
    #[must_use]
    pub fn length(&self) -> f64 {
        let open: f64 = self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
        match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => open + (first - last).norm(),
            _ => open,
        }
    }

    /// Mean of the vertices, or `None` when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Option<Point2> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Some(Point2::from(sum / self.points.len() as f64))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(closed: bool) -> Polyline {
        Polyline::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            closed,
        )
    }

    #[test]
    fn length_open_and_closed() {
        assert_abs_diff_eq!(square(false).length(), 3.0);
        assert_abs_diff_eq!(square(true).length(), 4.0);
    }

    #[test]
    fn centroid_of_square() {
        assert_abs_diff_eq!(square(true).centroid().unwrap(), Point2::new(0.5, 0.5));
        assert!(Polyline::default().centroid().is_none());
    }
}
