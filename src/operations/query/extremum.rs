use crate::error::Result;
use crate::geometry::Function;
use crate::math::extremum::golden_section;
use crate::math::{ExtremumKind, Point2, SolverParams};

/// Locates a local minimum or maximum of a function inside a bound.
///
/// The function is assumed unimodal around the best sample of a uniform
/// scan; a function whose best sample is an endpoint is treated as
/// monotonic and rejected.
#[derive(Debug, Clone)]
pub struct LocalExtremum {
    f: Function,
    x1: f64,
    x2: f64,
    kind: ExtremumKind,
    params: SolverParams,
}

impl LocalExtremum {
    #[must_use]
    pub fn new(f: Function, x1: f64, x2: f64, kind: ExtremumKind) -> Self {
        Self {
            f,
            x1,
            x2,
            kind,
            params: SolverParams::default(),
        }
    }

    /// Overrides the solver parameters.
    #[must_use]
    pub fn params(mut self, params: SolverParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the search, returning the `(x, y)` of the extremum.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::Degenerate`](crate::error::GeometryError::Degenerate)
    ///   for an empty bound or a monotonic function.
    /// - [`SolveError::Convergence`](crate::error::SolveError::Convergence)
    ///   if the search does not narrow within the iteration cap.
    pub fn execute(&self) -> Result<Point2> {
        golden_section(|x| self.f.y(x), self.x1, self.x2, self.kind, &self.params)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parabola_maximum() {
        let f = Function::new(|x| -(x - 3.0) * (x - 3.0) + 5.0);
        let p = LocalExtremum::new(f, 0.0, 6.0, ExtremumKind::Maximum).execute().unwrap();
        assert_abs_diff_eq!(p.x, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn reversed_bound_is_accepted() {
        let f = Function::new(|x| (x - 1.0) * (x - 1.0));
        let p = LocalExtremum::new(f, 4.0, -2.0, ExtremumKind::Minimum).execute().unwrap();
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn monotonic_is_degenerate() {
        let f = Function::new(f64::exp);
        let err = LocalExtremum::new(f, 0.0, 1.0, ExtremumKind::Maximum).execute().unwrap_err();
        assert!(err.is_degenerate());
    }
}
