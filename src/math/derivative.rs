/// Relative step of the centered finite difference.
pub const DERIVATIVE_STEP: f64 = 1e-6;

/// Approximates `f'(x)` with a centered finite difference.
///
/// The step is `DERIVATIVE_STEP * max(1, |x|)`. Truncation error is
/// `O(h²)` times the third derivative, so results near kinks or
/// discontinuities are unreliable. Returns NaN if `f` is not finite at
/// either sample.
#[must_use]
pub fn derivative<F>(f: F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = DERIVATIVE_STEP * x.abs().max(1.0);
    (f(x + h) - f(x - h)) / (2.0 * h)
}
