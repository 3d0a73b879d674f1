use super::root::SolverParams;
use super::Point2;
use crate::error::{GeometryError, Result, SolveError};

/// Which kind of extremum to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Minimum,
    Maximum,
}

impl ExtremumKind {
    /// Returns true if `a` is a better value than `b` for this kind.
    fn better(self, a: f64, b: f64) -> bool {
        match self {
            Self::Minimum => a < b,
            Self::Maximum => a > b,
        }
    }
}

/// `(sqrt(5) - 1) / 2`, the golden-section shrink factor.
pub(crate) const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Locates a local extremum of `f` inside `[x1, x2]`.
///
/// The bound is first sampled at `scan_samples + 1` points. If the best
/// sample lies on either end of the bound the function is treated as
/// monotonic there and rejected. Otherwise a golden-section search runs on
/// the two sample intervals around the best sample, which must be unimodal.
///
/// # Errors
///
/// - [`GeometryError::Degenerate`] for an empty or non-finite bound, or a
///   function that is monotonic (or constant) over the bound.
/// - [`SolveError::Convergence`] if the golden-section search does not reach
///   the tolerance within `max_iterations`.
pub fn golden_section<F>(f: F, x1: f64, x2: f64, kind: ExtremumKind, params: &SolverParams) -> Result<Point2>
where
    F: Fn(f64) -> f64,
{
    if !x1.is_finite() || !x2.is_finite() || x1 == x2 {
        return Err(GeometryError::Degenerate(format!("invalid extremum bound [{x1}, {x2}]")).into());
    }
    let (lo, hi) = if x1 < x2 { (x1, x2) } else { (x2, x1) };

    let n = params.scan_samples.max(2);
    #[allow(clippy::cast_precision_loss)]
    let step = (hi - lo) / n as f64;
    #[allow(clippy::cast_precision_loss)]
    let sample_x = |i: usize| if i == n { hi } else { lo + step * i as f64 };

    let mut best = 0;
    let mut best_y = f(lo);
    for i in 1..=n {
        let y = f(sample_x(i));
        if y.is_finite() && (!best_y.is_finite() || kind.better(y, best_y)) {
            best = i;
            best_y = y;
        }
    }
    if !best_y.is_finite() {
        return Err(GeometryError::Degenerate("function is not finite over the bound".into()).into());
    }
    if best == 0 || best == n {
        return Err(GeometryError::Degenerate(format!(
            "function is monotonic over [{lo}, {hi}]; no interior {kind:?}"
        ))
        .into());
    }

    let mut a = sample_x(best - 1);
    let mut b = sample_x(best + 1);
    let tol = params.width_tolerance(a, b).max(1e-10 * (hi - lo));
    let mut c = b - (b - a) * INV_PHI;
    let mut d = a + (b - a) * INV_PHI;
    let mut fc = f(c);
    let mut fd = f(d);

    for iteration in 0..params.max_iterations {
        if b - a <= tol {
            tracing::trace!(iterations = iteration, "golden-section converged");
            let x = a + (b - a) * 0.5;
            return Ok(Point2::new(x, f(x)));
        }
        if kind.better(fc, fd) {
            b = d;
            d = c;
            fd = fc;
            c = b - (b - a) * INV_PHI;
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + (b - a) * INV_PHI;
            fd = f(d);
        }
    }

    if b - a <= tol {
        let x = a + (b - a) * 0.5;
        return Ok(Point2::new(x, f(x)));
    }
    tracing::debug!(a, b, "golden-section hit the iteration cap");
    Err(SolveError::Convergence {
        iterations: params.max_iterations,
        width: b - a,
    }
    .into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parabola_maximum() {
        let p = golden_section(
            |x| -(x - 3.0).powi(2) + 5.0,
            0.0,
            6.0,
            ExtremumKind::Maximum,
            &SolverParams::default(),
        )
        .unwrap();
        assert_abs_diff_eq!(p.x, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn cosine_minimum_off_center() {
        let p = golden_section(f64::cos, 2.0, 5.0, ExtremumKind::Minimum, &SolverParams::default())
            .unwrap();
        assert_abs_diff_eq!(p.x, std::f64::consts::PI, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn monotonic_is_degenerate() {
        let err = golden_section(|x| 2.0 * x, 0.0, 1.0, ExtremumKind::Maximum, &SolverParams::default())
            .unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn constant_is_degenerate() {
        let err = golden_section(|_| 1.0, 0.0, 1.0, ExtremumKind::Minimum, &SolverParams::default())
            .unwrap_err();
        assert!(err.is_degenerate());
    }
}
