//! Bracketed scalar root search shared by every intersection case that has
//! no closed form.

use crate::error::{GeometryError, Result, SolveError};

use super::extremum::INV_PHI;

/// Parameters for the iterative solvers.
#[derive(Debug, Clone, Copy)]
pub struct SolverParams {
    /// Bracket width at which iteration stops, relative to the bracket
    /// magnitude (absolute for brackets within `[-1, 1]`).
    pub tolerance: f64,
    /// Iteration cap; exceeding it yields a convergence error.
    pub max_iterations: usize,
    /// Number of sub-intervals used when scanning a bracket or domain for
    /// sign changes.
    pub scan_samples: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 100,
            scan_samples: 32,
        }
    }
}

impl SolverParams {
    /// Absolute stopping width for a bracket `[a, b]`.
    #[must_use]
    pub fn width_tolerance(&self, a: f64, b: f64) -> f64 {
        self.tolerance * a.abs().max(b.abs()).max(1.0)
    }
}

/// Finds a root of `f` in `[a, b]` by bisection.
///
/// The endpoints must bracket a sign change. An endpoint that is an exact
/// root is returned immediately. The returned value always lies inside the
/// bracket.
///
/// # Errors
///
/// - [`GeometryError::Degenerate`] if the bracket is empty or not finite.
/// - [`SolveError::NoIntersection`] if `f(a)` and `f(b)` have the same sign
///   or either is not finite.
/// - [`SolveError::Convergence`] if the bracket does not shrink below the
///   tolerance within `max_iterations`.
pub fn find_root<F>(f: F, a: f64, b: f64, params: &SolverParams) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = ordered_bracket(a, b)?;
    let mut f_lo = f(lo);
    let f_hi = f(hi);
    if !f_lo.is_finite() || !f_hi.is_finite() {
        return Err(SolveError::NoIntersection(format!(
            "function is not finite at bracket endpoints [{lo}, {hi}]"
        ))
        .into());
    }
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(SolveError::NoIntersection(format!(
            "no sign change in bracket [{lo}, {hi}]"
        ))
        .into());
    }

    let tol = params.width_tolerance(lo, hi);
    for iteration in 0..params.max_iterations {
        let mid = lo + (hi - lo) * 0.5;
        if hi - lo <= tol || mid <= lo || mid >= hi {
            tracing::trace!(iterations = iteration, "bisection converged");
            return Ok(mid);
        }
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return Ok(mid);
        }
        // A NaN midpoint keeps the lower half; the bracket still shrinks.
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    if hi - lo <= tol {
        return Ok(lo + (hi - lo) * 0.5);
    }
    tracing::debug!(lo, hi, "bisection hit the iteration cap");
    Err(SolveError::Convergence {
        iterations: params.max_iterations,
        width: hi - lo,
    }
    .into())
}

/// Finds the single root of `f` in `[a, b]`, rejecting brackets that
/// contain more than one sign change among `scan_samples` sub-intervals.
///
/// # Errors
///
/// Same as [`find_root`], plus [`SolveError::Ambiguous`] when the scan
/// detects more than one sign change.
pub fn find_single_root<F>(f: F, a: f64, b: f64, params: &SolverParams) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let (lo, hi) = ordered_bracket(a, b)?;
    let (f_lo, f_hi) = (f(lo), f(hi));
    if f_lo.is_finite() && f_hi.is_finite() && f_lo != 0.0 && f_hi != 0.0 {
        if f_lo.signum() == f_hi.signum() {
            return Err(SolveError::NoIntersection(format!(
                "no sign change in bracket [{lo}, {hi}]"
            ))
            .into());
        }
        let changes = sign_change_intervals(&f, lo, hi, params.scan_samples);
        if changes.len() > 1 {
            tracing::debug!(lo, hi, changes = changes.len(), "ambiguous bracket");
            return Err(SolveError::Ambiguous(format!(
                "bracket [{lo}, {hi}] contains {} sign changes",
                changes.len()
            ))
            .into());
        }
    }
    find_root(f, lo, hi, params)
}

/// Finds every root of `f` on `[a, b]` from a uniform scan of `samples`
/// sub-intervals.
///
/// Sign changes (and exact zeros) between samples are bisected. A sample
/// where `|f|` dips between same-sign neighbours may hide two roots inside
/// one sub-interval pair; a golden-section search over that pair looks for
/// a point of opposite sign and both halves are then bisected. Roots are
/// returned in increasing order. Touching roots that never change sign are
/// not reported.
///
/// # Errors
///
/// Returns an error if the domain is degenerate or a bisection fails to
/// converge.
pub fn find_roots_sampled<F>(f: F, a: f64, b: f64, samples: usize, params: &SolverParams) -> Result<Vec<f64>>
where
    F: Fn(f64) -> f64,
{
    let (lo, hi) = ordered_bracket(a, b)?;
    scan_roots(&f, lo, hi, samples, None, params)
}

/// Same as [`find_roots_sampled`] for `f` periodic over `[a, b]`.
///
/// The dip search also runs across the seam at `a`, using the sample
/// before `b` as the left neighbour of `a`. Roots found below `a` are
/// shifted up by one period.
///
/// # Errors
///
/// Same as [`find_roots_sampled`].
pub fn find_roots_periodic<F>(f: F, a: f64, b: f64, samples: usize, params: &SolverParams) -> Result<Vec<f64>>
where
    F: Fn(f64) -> f64,
{
    let (lo, hi) = ordered_bracket(a, b)?;
    scan_roots(&f, lo, hi, samples, Some(hi - lo), params)
}

fn scan_roots<F>(
    f: &F,
    lo: f64,
    hi: f64,
    samples: usize,
    period: Option<f64>,
    params: &SolverParams,
) -> Result<Vec<f64>>
where
    F: Fn(f64) -> f64,
{
    let pts = sample(f, lo, hi, samples);
    let mut brackets = sign_changes(&pts);
    let mut dip = |left: (f64, f64), mid: (f64, f64), right: (f64, f64)| {
        if let Some(x) = dip_crossing(f, left, mid, right, params) {
            tracing::trace!(x, "sign change between samples");
            brackets.push((left.0, x));
            brackets.push((x, right.0));
        }
    };
    for w in pts.windows(3) {
        dip(w[0], w[1], w[2]);
    }
    if let (Some(period), [first, second, .., before_last, _]) = (period, pts.as_slice()) {
        dip((before_last.0 - period, before_last.1), *first, *second);
    }

    let mut roots = Vec::with_capacity(brackets.len());
    for (x0, x1) in brackets {
        let r = find_root(f, x0, x1, params)?;
        roots.push(match period {
            Some(period) if r < lo => r + period,
            _ => r,
        });
    }
    roots.sort_by(f64::total_cmp);
    let tol = params.width_tolerance(lo, hi) * 10.0;
    roots.dedup_by(|r, kept| (*r - *kept).abs() <= tol);
    Ok(roots)
}

/// Looks for a point of opposite sign between `left` and `right` when the
/// middle sample is a same-sign local minimum of `|f|`.
fn dip_crossing<F>(
    f: &F,
    (xl, yl): (f64, f64),
    (_, ym): (f64, f64),
    (xr, yr): (f64, f64),
    params: &SolverParams,
) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    if !(yl.is_finite() && ym.is_finite() && yr.is_finite()) || ym == 0.0 {
        return None;
    }
    let s = ym.signum();
    if yl.signum() != s || yr.signum() != s || ym.abs() > yl.abs() || ym.abs() > yr.abs() {
        return None;
    }

    let h = |x: f64| s * f(x);
    let (mut a, mut b) = (xl, xr);
    let tol = params.width_tolerance(a, b);
    let mut c = b - (b - a) * INV_PHI;
    let mut d = a + (b - a) * INV_PHI;
    let (mut hc, mut hd) = (h(c), h(d));
    for _ in 0..params.max_iterations {
        if hc < 0.0 {
            return Some(c);
        }
        if hd < 0.0 {
            return Some(d);
        }
        if b - a <= tol {
            break;
        }
        if hc < hd {
            b = d;
            d = c;
            hd = hc;
            c = b - (b - a) * INV_PHI;
            hc = h(c);
        } else {
            a = c;
            c = d;
            hc = hd;
            d = a + (b - a) * INV_PHI;
            hd = h(d);
        }
    }
    None
}

/// Uniform samples `(x, f(x))` at `samples + 1` points spanning `[lo, hi]`.
fn sample<F>(f: &F, lo: f64, hi: f64, samples: usize) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let n = samples.max(1);
    #[allow(clippy::cast_precision_loss)]
    let step = (hi - lo) / n as f64;
    (0..=n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = if i == n { hi } else { lo + step * i as f64 };
            (x, f(x))
        })
        .collect()
}

/// Adjacent sample pairs whose values change sign or touch zero.
fn sign_changes(pts: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let last = pts.len().saturating_sub(2);
    pts.windows(2)
        .enumerate()
        .filter_map(|(i, w)| {
            let ((x0, y0), (x1, y1)) = (w[0], w[1]);
            if !y0.is_finite() || !y1.is_finite() {
                return None;
            }
            let touches_zero = y0 == 0.0 || (y1 == 0.0 && i == last);
            (touches_zero || y0.signum() != y1.signum()).then_some((x0, x1))
        })
        .collect()
}

/// Sub-intervals of a uniform scan over `[lo, hi]` whose endpoint values
/// change sign or touch zero.
pub(crate) fn sign_change_intervals<F>(f: &F, lo: f64, hi: f64, samples: usize) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    sign_changes(&sample(f, lo, hi, samples))
}

fn ordered_bracket(a: f64, b: f64) -> Result<(f64, f64)> {
    if !a.is_finite() || !b.is_finite() {
        return Err(GeometryError::Degenerate(format!("bracket [{a}, {b}] is not finite")).into());
    }
    if a == b {
        return Err(GeometryError::Degenerate(format!("bracket [{a}, {b}] is empty")).into());
    }
    Ok(if a < b { (a, b) } else { (b, a) })
}
