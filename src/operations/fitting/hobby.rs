//! Hobby's algorithm for choosing Bezier control points through a sequence
//! of knots.
//!
//! For every knot `k` the solver picks the angle `theta[k]` between the
//! outgoing chord and the outgoing tangent. The angle `phi[k]` between the
//! incoming chord and the incoming tangent follows from continuity of
//! direction: `phi[k] = -theta[k] - psi[k]`, where `psi[k]` is the turning
//! angle between the chords. Equal mock curvature at every interior knot
//! gives one linear equation per knot; curl conditions close an open path.

use nalgebra::{DMatrix, DVector};

use crate::error::{GeometryError, Result};
use crate::geometry::{Bezier, BezierSpline};
use crate::math::point_2d::{cross, points_close, rotate_vec};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Smallest tension accepted.
const MIN_TENSION: f64 = 0.75;

/// Upper bound on the velocity function, as a fraction of the chord.
const MAX_VELOCITY: f64 = 4.0;

/// Fits a smooth path of cubic Bezier segments through ordered points.
///
/// Open paths get `N - 1` segments with curl end conditions; cyclic paths get
/// `N` segments. Segment endpoints are exactly the input points.
#[derive(Debug, Clone)]
pub struct FitHobby {
    points: Vec<Point2>,
    cyclic: bool,
    tension: f64,
    curl: f64,
}

impl FitHobby {
    /// Creates an open fit with tension 1 and curl 1.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            points,
            cyclic: false,
            tension: 1.0,
            curl: 1.0,
        }
    }

    /// Closes the path back to the first point.
    #[must_use]
    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    /// Uniform tension; larger values pull the path toward its chords.
    #[must_use]
    pub fn tension(mut self, tension: f64) -> Self {
        self.tension = tension;
        self
    }

    /// Curl at both ends of an open path.
    #[must_use]
    pub fn curl(mut self, curl: f64) -> Self {
        self.curl = curl;
        self
    }

    /// Executes the fit.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for fewer than two points (three
    /// distinct points when cyclic), coincident consecutive points,
    /// non-finite input, tension below 0.75, negative curl, or a singular
    /// system.
    pub fn execute(&self) -> Result<BezierSpline> {
        self.validate_params()?;
        let mut knots = self.points.clone();
        if self.cyclic && knots.len() > 1 && points_close(&knots[0], &knots[knots.len() - 1]) {
            knots.pop();
        }
        let required = if self.cyclic { 3 } else { 2 };
        if knots.len() < required {
            return Err(GeometryError::Degenerate(format!(
                "hobby fit needs at least {required} points, got {}",
                knots.len()
            ))
            .into());
        }
        if let Some(p) = knots.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::Degenerate(format!("point ({}, {}) is not finite", p.x, p.y)).into());
        }

        let n = knots.len();
        let segment_count = if self.cyclic { n } else { n - 1 };
        let chords: Vec<Vector2> = (0..segment_count).map(|k| knots[(k + 1) % n] - knots[k]).collect();
        let dist: Vec<f64> = chords.iter().map(|c| c.norm()).collect();
        if let Some(k) = dist.iter().position(|d| *d < TOLERANCE) {
            return Err(GeometryError::Degenerate(format!("points {k} and {} coincide", (k + 1) % n)).into());
        }

        let (theta, phi) = if self.cyclic {
            self.solve_cyclic(&chords, &dist)?
        } else {
            self.solve_open(&chords, &dist)?
        };
        tracing::trace!(knots = n, cyclic = self.cyclic, "hobby angles solved");

        let segments = (0..segment_count)
            .map(|k| {
                let start = knots[k];
                let end = knots[(k + 1) % n];
                let (c1, c2) = self.controls(start, end, chords[k], theta[k], phi[(k + 1) % phi.len()]);
                Bezier::cubic(start, c1, c2, end)
            })
            .collect::<Result<Vec<_>>>()?;
        BezierSpline::new(segments)
    }

    fn validate_params(&self) -> Result<()> {
        if !self.tension.is_finite() || self.tension < MIN_TENSION {
            return Err(GeometryError::Degenerate(format!(
                "tension must be at least {MIN_TENSION}, got {}",
                self.tension
            ))
            .into());
        }
        if !self.curl.is_finite() || self.curl < 0.0 {
            return Err(GeometryError::Degenerate(format!("curl must be non-negative, got {}", self.curl)).into());
        }
        Ok(())
    }

    /// Ratio `theta[0] / phi[1]` imposed by the start curl, and
    /// `phi[n] / theta[n-1]` at the end.
    fn curl_ratio(&self) -> f64 {
        let a = 1.0 / self.tension;
        ((3.0 - a) * self.curl + a) / (a * self.curl + 3.0 - a)
    }

    /// Forward sweep and back substitution on the tridiagonal system, with
    /// `theta[k] = v[k] - u[k] * theta[k + 1]`.
    fn solve_open(&self, chords: &[Vector2], dist: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        let segments = chords.len();
        let mut psi = vec![0.0; segments + 1];
        for k in 1..segments {
            psi[k] = turning_angle(&chords[k - 1], &chords[k]);
        }
        if segments == 1 {
            return Ok((vec![0.0, 0.0], vec![0.0, 0.0]));
        }

        let r = self.curl_ratio();
        let s = 3.0 * self.tension - 1.0;
        let mut u = vec![0.0; segments];
        let mut v = vec![0.0; segments];
        u[0] = r;
        v[0] = -r * psi[1];
        for k in 1..segments {
            let a = 1.0 / dist[k - 1];
            let c = 1.0 / dist[k];
            let b = s * (a + c);
            let d = -s * psi[k] * a - psi[k + 1] * c;
            let denom = nonzero(b - a * u[k - 1])?;
            u[k] = c / denom;
            v[k] = (d - a * v[k - 1]) / denom;
        }

        let mut theta = vec![0.0; segments + 1];
        theta[segments] = -r * v[segments - 1] / nonzero(1.0 - r * u[segments - 1])?;
        for k in (0..segments).rev() {
            theta[k] = v[k] - u[k] * theta[k + 1];
        }

        let mut phi: Vec<f64> = theta.iter().zip(&psi).map(|(t, p)| -t - p).collect();
        phi[segments] = -theta[segments];
        Ok((theta, phi))
    }

    /// Periodic system solved densely.
    fn solve_cyclic(&self, chords: &[Vector2], dist: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        let n = chords.len();
        let psi: Vec<f64> = (0..n)
            .map(|k| turning_angle(&chords[(k + n - 1) % n], &chords[k]))
            .collect();
        let s = 3.0 * self.tension - 1.0;

        let mut m = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);
        for k in 0..n {
            let prev = (k + n - 1) % n;
            let next = (k + 1) % n;
            let a = 1.0 / dist[prev];
            let c = 1.0 / dist[k];
            m[(k, prev)] += a;
            m[(k, k)] += s * (a + c);
            m[(k, next)] += c;
            rhs[k] = -s * psi[k] * a - psi[next] * c;
        }
        let theta = m
            .lu()
            .solve(&rhs)
            .ok_or_else(|| GeometryError::Degenerate("hobby system is singular".into()))?;
        let theta: Vec<f64> = theta.iter().copied().collect();
        let phi = theta.iter().zip(&psi).map(|(t, p)| -t - p).collect();
        Ok((theta, phi))
    }

    /// Inner control points of the segment from `start` to `end`.
    fn controls(&self, start: Point2, end: Point2, chord: Vector2, theta: f64, phi: f64) -> (Point2, Point2) {
        let rho = velocity(theta, phi) / self.tension;
        let sigma = velocity(phi, theta) / self.tension;
        (
            start + rotate_vec(&chord, theta) * (rho / 3.0),
            end - rotate_vec(&chord, -phi) * (sigma / 3.0),
        )
    }
}

/// Hobby's velocity function, scaled so a straight segment gives 1.
fn velocity(theta: f64, phi: f64) -> f64 {
    let (st, ct) = theta.sin_cos();
    let (sf, cf) = phi.sin_cos();
    let sqrt5 = 5.0_f64.sqrt();
    let num = 2.0 + std::f64::consts::SQRT_2 * (st - sf / 16.0) * (sf - st / 16.0) * (ct - cf);
    let den = 1.0 + 0.5 * (sqrt5 - 1.0) * ct + 0.5 * (3.0 - sqrt5) * cf;
    (num / den).min(MAX_VELOCITY)
}

/// Signed angle from `a` to `b` in `(-pi, pi]`.
fn turning_angle(a: &Vector2, b: &Vector2) -> f64 {
    cross(a, b).atan2(a.dot(b))
}

fn nonzero(x: f64) -> Result<f64> {
    if x.is_finite() && x.abs() > f64::EPSILON {
        Ok(x)
    } else {
        Err(GeometryError::Degenerate("hobby system is singular".into()).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Curve;
    use approx::assert_abs_diff_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn velocity_of_straight_segment() {
        assert_abs_diff_eq!(velocity(0.0, 0.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn two_points_give_a_straight_segment() {
        let s = FitHobby::new(pts(&[(0.0, 0.0), (3.0, 0.0)])).execute().unwrap();
        let cp = s.segments()[0].control_points().to_vec();
        assert_abs_diff_eq!(cp[1], Point2::new(1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(cp[2], Point2::new(2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn symmetric_peak_has_horizontal_tangent() {
        let s = FitHobby::new(pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])).execute().unwrap();
        assert_eq!(s.segments().len(), 2);
        let incoming = s.segments()[0].control_points()[2];
        let outgoing = s.segments()[1].control_points()[1];
        assert_abs_diff_eq!(incoming.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(outgoing.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(incoming.x + outgoing.x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_points_stay_straight() {
        let s = FitHobby::new(pts(&[(0.0, 0.0), (1.0, 1.0), (3.0, 3.0), (4.0, 4.0)])).execute().unwrap();
        for seg in s.segments() {
            for p in seg.control_points() {
                assert_abs_diff_eq!(p.x, p.y, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn cyclic_square_approximates_circle() {
        let s = FitHobby::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]))
            .cyclic(true)
            .execute()
            .unwrap();
        assert_eq!(s.segments().len(), 4);
        assert!(s.is_closed());
        let center = Point2::new(0.5, 0.5);
        for seg in s.segments() {
            assert_abs_diff_eq!((seg.evaluate(0.5) - center).norm(), 0.5_f64.sqrt(), epsilon = 1e-9);
        }
    }

    #[test]
    fn repeated_closing_point_is_dropped() {
        let s = FitHobby::new(pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]))
            .cyclic(true)
            .execute()
            .unwrap();
        assert_eq!(s.segments().len(), 3);
    }

    #[test]
    fn higher_tension_shortens_handles() {
        let p = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let loose = FitHobby::new(p.clone()).execute().unwrap();
        let tight = FitHobby::new(p).tension(2.0).execute().unwrap();
        let handle = |s: &BezierSpline| {
            let cp = s.segments()[0].control_points();
            (cp[1] - cp[0]).norm()
        };
        assert!(handle(&tight) < handle(&loose));
    }

    #[test]
    fn invalid_input() {
        assert!(FitHobby::new(pts(&[(0.0, 0.0)])).execute().unwrap_err().is_degenerate());
        assert!(FitHobby::new(pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)])).execute().is_err());
        assert!(FitHobby::new(pts(&[(0.0, 0.0), (1.0, 0.0)])).cyclic(true).execute().is_err());
        assert!(FitHobby::new(pts(&[(0.0, 0.0), (1.0, 0.0)])).tension(0.5).execute().is_err());
        assert!(FitHobby::new(pts(&[(0.0, 0.0), (1.0, 0.0)])).curl(-1.0).execute().is_err());
    }
}
