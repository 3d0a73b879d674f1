/// Angle helpers. All angles are in radians.
use std::f64::consts::TAU;

/// Counter-clockwise angular difference from `theta1` to `theta2`, in `[0, 2π)`.
#[must_use]
pub fn angle_diff(theta1: f64, theta2: f64) -> f64 {
    let d = theta2 - theta1;
    let delta = d.sin().atan2(d.cos());
    if delta < 0.0 {
        delta + TAU
    } else {
        delta
    }
}

/// Returns true if `angle` lies on the counter-clockwise sweep from `theta1` to `theta2`.
#[must_use]
pub fn angle_isbetween(angle: f64, theta1: f64, theta2: f64) -> bool {
    angle_diff(theta1, angle) <= angle_diff(theta1, theta2)
}

/// Circular mean of two angles, normalized to `[0, 2π)`.
#[must_use]
pub fn angle_mean(theta1: f64, theta2: f64) -> f64 {
    let s = theta1.sin() + theta2.sin();
    let c = theta1.cos() + theta2.cos();
    normalize(s.atan2(c))
}

/// Normalizes an angle to `[0, 2π)`.
#[must_use]
pub fn normalize(theta: f64) -> f64 {
    let t = theta.rem_euclid(TAU);
    if t >= TAU {
        0.0
    } else {
        t
    }
}
