use crate::math::{Point2, Vector2};

use super::curve::{Arc, Bezier, Circle, Curve, CurveDomain, Ellipse, Function, Implicit, Line};

/// Discriminant of [`Shape`], ordered so that a pair can be sorted into a
/// single dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    Line,
    Circle,
    Arc,
    Ellipse,
    Bezier,
    Function,
}

/// The closed set of shapes the solvers accept.
#[derive(Debug, Clone)]
pub enum Shape {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Bezier(Bezier),
    Function(Function),
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Line(_) => ShapeKind::Line,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Arc(_) => ShapeKind::Arc,
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::Bezier(_) => ShapeKind::Bezier,
            Self::Function(_) => ShapeKind::Function,
        }
    }

    /// Replaces an ellipse with equal radii by the equivalent circle.
    #[must_use]
    pub fn normalized(&self) -> Self {
        match self {
            Self::Ellipse(e) => e.as_circle().map_or_else(|| self.clone(), Self::Circle),
            _ => self.clone(),
        }
    }

    /// The implicit form, when the shape has one.
    ///
    /// Bezier curves and arcs have none.
    #[must_use]
    pub fn as_implicit(&self) -> Option<&dyn Implicit> {
        match self {
            Self::Line(s) => Some(s),
            Self::Circle(s) => Some(s),
            Self::Ellipse(s) => Some(s),
            Self::Function(s) => Some(s),
            Self::Arc(_) | Self::Bezier(_) => None,
        }
    }

    fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Line(s) => s,
            Self::Circle(s) => s,
            Self::Arc(s) => s,
            Self::Ellipse(s) => s,
            Self::Bezier(s) => s,
            Self::Function(s) => s,
        }
    }
}

impl Curve for Shape {
    fn evaluate(&self, t: f64) -> Point2 {
        self.as_curve().evaluate(t)
    }

    fn derivative(&self, t: f64) -> Vector2 {
        self.as_curve().derivative(t)
    }

    fn domain(&self) -> CurveDomain {
        self.as_curve().domain()
    }

    fn is_closed(&self) -> bool {
        self.as_curve().is_closed()
    }
}

impl From<Line> for Shape {
    fn from(s: Line) -> Self {
        Self::Line(s)
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Self::Circle(s)
    }
}

impl From<Arc> for Shape {
    fn from(s: Arc) -> Self {
        Self::Arc(s)
    }
}

impl From<Ellipse> for Shape {
    fn from(s: Ellipse) -> Self {
        Self::Ellipse(s)
    }
}

impl From<Bezier> for Shape {
    fn from(s: Bezier) -> Self {
        Self::Bezier(s)
    }
}

impl From<Function> for Shape {
    fn from(s: Function) -> Self {
        Self::Function(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_ellipse_normalizes_to_circle() {
        let e = Ellipse::new(Point2::origin(), 1.5, 1.5, 0.4).unwrap();
        let s = Shape::from(e).normalized();
        assert_eq!(s.kind(), ShapeKind::Circle);

        let e = Ellipse::new(Point2::origin(), 2.0, 1.5, 0.4).unwrap();
        assert_eq!(Shape::from(e).normalized().kind(), ShapeKind::Ellipse);
    }

    #[test]
    fn kinds_sort_into_dispatch_order() {
        let mut pair = [ShapeKind::Function, ShapeKind::Line];
        pair.sort();
        assert_eq!(pair, [ShapeKind::Line, ShapeKind::Function]);
    }

    #[test]
    fn bezier_has_no_implicit_form() {
        let b = Bezier::quadratic(Point2::origin(), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)).unwrap();
        assert!(Shape::from(b).as_implicit().is_none());
        let l = Line::horizontal(1.0).unwrap();
        assert!(Shape::from(l).as_implicit().is_some());
        let a = Arc::new(Point2::origin(), 1.0, 0.0, 1.0).unwrap();
        assert!(Shape::from(a).as_implicit().is_none());
    }
}
