mod bezier;
mod circle_circle;
mod line_circle;
mod line_line;
mod numeric;

use std::f64::consts::TAU;

use crate::error::{Result, SolveError};
use crate::geometry::{Arc, Shape, ShapeKind};
use crate::math::point_2d::{distance, sort_canonical, unique_points};
use crate::math::{Point2, SolverParams, TOLERANCE};

/// Rule for picking one point out of several intersections.
///
/// Ties (within tolerance) keep the point that comes first in canonical
/// order (increasing x, then increasing y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Which {
    /// Largest y.
    Top,
    /// Smallest y.
    Bottom,
    /// Smallest x.
    Left,
    /// Largest x.
    Right,
    /// Closest to a reference point.
    Nearest(Point2),
}

impl Which {
    /// Picks a point from a non-empty, canonically ordered slice.
    fn select(self, points: &[Point2]) -> Option<Point2> {
        let score = |p: &Point2| match self {
            Self::Top => p.y,
            Self::Bottom => -p.y,
            Self::Left => -p.x,
            Self::Right => p.x,
            Self::Nearest(r) => -distance(p, &r),
        };
        let mut best = *points.first()?;
        let mut best_score = score(&best);
        for p in &points[1..] {
            let s = score(p);
            if s > best_score + TOLERANCE * best_score.abs().max(1.0) {
                best = *p;
                best_score = s;
            }
        }
        Some(best)
    }
}

/// One or more intersection points in canonical order.
///
/// Never empty: a pair of shapes that does not meet is an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    points: Vec<Point2>,
}

#[allow(clippy::len_without_is_empty)]
impl Intersection {
    fn from_points(points: Vec<Point2>, kinds: (ShapeKind, ShapeKind)) -> Result<Self> {
        let mut points = unique_points(&points);
        if points.is_empty() {
            return Err(SolveError::NoIntersection(format!("{:?} and {:?} do not meet", kinds.0, kinds.1)).into());
        }
        sort_canonical(&mut points);
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// The first point in canonical order.
    #[must_use]
    pub fn first(&self) -> Point2 {
        self.points[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A single tangency point rather than a crossing pair.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.points.len() == 1
    }

    /// Picks one point by `which`.
    #[must_use]
    pub fn select(&self, which: Which) -> Point2 {
        which.select(&self.points).unwrap_or(self.points[0])
    }

    /// Consumes the result, returning the points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }
}

/// Computes where two shapes meet.
///
/// Closed forms handle line/line, line/circle, line/ellipse and
/// circle/circle. Bezier curves against lines and other Bezier curves use
/// subdivision. Remaining pairs are reduced to bracketed root searches:
/// pairs involving a [`Function`](crate::geometry::Function) search the
/// x-bracket given with [`Intersect::bracket`], others sweep the parameter
/// domain of one shape against the implicit form of the other.
///
/// Arcs are intersected as their full circle; points outside the sweep
/// are then dropped. When a bracket is given, points with x outside it are
/// dropped for every pair.
#[derive(Debug, Clone)]
pub struct Intersect {
    a: Shape,
    b: Shape,
    which: Option<Which>,
    bracket: Option<(f64, f64)>,
    params: SolverParams,
}

impl Intersect {
    /// Creates a new intersection query.
    #[must_use]
    pub fn new(a: impl Into<Shape>, b: impl Into<Shape>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            which: None,
            bracket: None,
            params: SolverParams::default(),
        }
    }

    /// Reduces the result to the single point chosen by `which`.
    #[must_use]
    pub fn which(mut self, which: Which) -> Self {
        self.which = Some(which);
        self
    }

    /// Restricts the search to `x` in `[x1, x2]`.
    #[must_use]
    pub fn bracket(mut self, x1: f64, x2: f64) -> Self {
        self.bracket = Some((x1.min(x2), x1.max(x2)));
        self
    }

    /// Overrides the solver parameters.
    #[must_use]
    pub fn params(mut self, params: SolverParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// - [`SolveError::NoIntersection`] if the shapes do not meet (within
    ///   the bracket or on the arc sweep, when given).
    /// - [`GeometryError::Degenerate`](crate::error::GeometryError::Degenerate)
    ///   for coincident lines, circles or arcs, and for a Bezier curve lying
    ///   on a line.
    /// - [`SolveError::Ambiguous`] for function pairs without a bracket, or
    ///   brackets holding more than one crossing.
    /// - [`SolveError::Convergence`] if an iterative search hits its cap.
    pub fn execute(&self) -> Result<Intersection> {
        let (a, clip_a) = full_shape(&self.a);
        let (b, clip_b) = full_shape(&self.b);
        let (a, b) = if a.kind() <= b.kind() { (a, b) } else { (b, a) };
        let kinds = (self.a.kind(), self.b.kind());

        let mut points = self.dispatch(&a, &b)?;
        for arc in clip_a.iter().chain(clip_b.iter()) {
            points.retain(|p| arc.contains_point(p));
        }
        if let Some((x1, x2)) = self.bracket {
            let tol = self.params.width_tolerance(x1, x2);
            points.retain(|p| p.x >= x1 - tol && p.x <= x2 + tol);
        }
        let found = Intersection::from_points(points, kinds)?;
        match self.which {
            Some(which) => Ok(Intersection {
                points: vec![found.select(which)],
            }),
            None => Ok(found),
        }
    }

    /// Dispatches on the pair of kinds; `a.kind() <= b.kind()`.
    fn dispatch(&self, a: &Shape, b: &Shape) -> Result<Vec<Point2>> {
        let params = &self.params;
        match (a, b) {
            (Shape::Line(l1), Shape::Line(l2)) => line_line::line_line(l1, l2),
            (Shape::Line(l), Shape::Circle(c)) => Ok(line_circle::line_circle(l, c)),
            (Shape::Line(l), Shape::Ellipse(e)) => Ok(line_circle::line_ellipse(l, e)),
            (Shape::Line(l), Shape::Bezier(bz)) => bezier::bezier_line(bz, l, params),
            (Shape::Line(l), Shape::Function(f)) => numeric::line_function(l, f, self.bracket, params),
            (Shape::Circle(c1), Shape::Circle(c2)) => circle_circle::circle_circle(c1, c2),
            (Shape::Circle(c), Shape::Ellipse(e)) => numeric::sampled_implicit(c, 0.0, TAU, e, params),
            (Shape::Ellipse(e1), Shape::Ellipse(e2)) => numeric::sampled_implicit(e1, 0.0, TAU, e2, params),
            (Shape::Circle(c), Shape::Bezier(bz)) => numeric::sampled_implicit(bz, 0.0, 1.0, c, params),
            (Shape::Ellipse(e), Shape::Bezier(bz)) => numeric::sampled_implicit(bz, 0.0, 1.0, e, params),
            (Shape::Circle(c), Shape::Function(f)) => {
                self.require_bracket()?;
                numeric::sampled_implicit(c, 0.0, TAU, f, params)
            }
            (Shape::Ellipse(e), Shape::Function(f)) => {
                self.require_bracket()?;
                numeric::sampled_implicit(e, 0.0, TAU, f, params)
            }
            (Shape::Bezier(b1), Shape::Bezier(b2)) => bezier::bezier_bezier(b1, b2),
            (Shape::Bezier(bz), Shape::Function(f)) => numeric::sampled_implicit(bz, 0.0, 1.0, f, params),
            (Shape::Function(f), Shape::Function(g)) => numeric::function_function(f, g, self.bracket, params),
            _ => Err(SolveError::Ambiguous(format!(
                "no intersection rule for {:?} and {:?}",
                a.kind(),
                b.kind()
            ))
            .into()),
        }
    }

    fn require_bracket(&self) -> Result<()> {
        if self.bracket.is_some() {
            Ok(())
        } else {
            Err(SolveError::Ambiguous("intersecting a function requires an x-bracket".into()).into())
        }
    }
}

/// The shape to intersect, with arcs widened to their circle, plus the arc
/// to clip the result by.
fn full_shape(shape: &Shape) -> (Shape, Option<Arc>) {
    match shape {
        Shape::Arc(arc) => (Shape::Circle(*arc.circle()), Some(*arc)),
        other => (other.normalized(), None),
    }
}
