use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::math::derivative::derivative;
use crate::math::extremum::golden_section;
use crate::math::root::find_single_root;
use crate::math::{ExtremumKind, Point2, SolverParams, Vector2};

use super::{Curve, CurveDomain, Implicit};

/// The graph `y = f(x)` of an arbitrary callable.
///
/// Cloning shares the underlying callable.
#[derive(Clone)]
pub struct Function {
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl Function {
    /// Wraps a callable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Evaluates `f(x)`.
    #[must_use]
    pub fn y(&self, x: f64) -> f64 {
        (self.f)(x)
    }

    /// Slope `f'(x)` by centered finite difference.
    #[must_use]
    pub fn slope_at(&self, x: f64) -> f64 {
        derivative(|x| self.y(x), x)
    }

    /// Solves `f(x) = y` for the single `x` in `bracket`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bracket holds no crossing, more than one
    /// crossing, or bisection does not converge.
    pub fn x_at(&self, y: f64, bracket: (f64, f64), params: &SolverParams) -> Result<f64> {
        find_single_root(|x| self.y(x) - y, bracket.0, bracket.1, params)
    }

    /// Local minimum or maximum within `[x1, x2]`.
    ///
    /// # Errors
    ///
    /// See [`golden_section`].
    pub fn local_extremum(&self, x1: f64, x2: f64, kind: ExtremumKind, params: &SolverParams) -> Result<Point2> {
        golden_section(|x| self.y(x), x1, x2, kind, params)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").finish_non_exhaustive()
    }
}

impl Curve for Function {
    /// The parameter is the x coordinate.
    fn evaluate(&self, t: f64) -> Point2 {
        Point2::new(t, self.y(t))
    }

    fn derivative(&self, t: f64) -> Vector2 {
        Vector2::new(1.0, self.slope_at(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl Implicit for Function {
    /// `y - f(x)`; positive above the graph.
    fn implicit_value(&self, x: f64, y: f64) -> f64 {
        y - self.y(x)
    }
}
