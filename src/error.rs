use thiserror::Error;

/// Top-level error type for the plotgeom engine.
#[derive(Debug, Error)]
pub enum PlotgeomError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl PlotgeomError {
    /// Returns true for malformed or degenerate input.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::Geometry(GeometryError::Degenerate(_) | GeometryError::ZeroVector)
        )
    }

    /// Returns true when valid input has no real solution in the requested domain.
    #[must_use]
    pub fn is_no_intersection(&self) -> bool {
        matches!(
            self,
            Self::Solve(SolveError::NoIntersection(_) | SolveError::NoSolution(_))
        )
    }

    /// Returns true when the input cannot be resolved to a single answer.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Solve(SolveError::Ambiguous(_)))
    }

    /// Returns true when an iterative method hit its iteration cap.
    #[must_use]
    pub fn is_convergence(&self) -> bool {
        matches!(self, Self::Solve(SolveError::Convergence { .. }))
    }
}

/// Errors raised while constructing or querying geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by the solvers (root finding, intersection, extremum search).
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("no intersection: {0}")]
    NoIntersection(String),

    #[error("no solution: {0}")]
    NoSolution(String),

    #[error("ambiguous input: {0}")]
    Ambiguous(String),

    #[error("no convergence after {iterations} iterations (bracket width {width:e})")]
    Convergence { iterations: usize, width: f64 },
}

/// Convenience type alias for results using [`PlotgeomError`].
pub type Result<T> = std::result::Result<T, PlotgeomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_follow_taxonomy() {
        let e: PlotgeomError = GeometryError::Degenerate("radius".into()).into();
        assert!(e.is_degenerate());
        assert!(!e.is_no_intersection());

        let e: PlotgeomError = SolveError::NoIntersection("parallel".into()).into();
        assert!(e.is_no_intersection());

        let e: PlotgeomError = SolveError::Convergence {
            iterations: 100,
            width: 1.0,
        }
        .into();
        assert!(e.is_convergence());
        assert!(e.to_string().contains("100 iterations"));
    }
}
