//! Subdivision searches for Bezier crossings.

use crate::error::{GeometryError, Result, SolveError};
use crate::geometry::{Bezier, Curve, Implicit, Line};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::point_2d::cross;
use crate::math::root::find_root;
use crate::math::{Point2, SolverParams, TOLERANCE};

/// Subdivision depth at which a piece is treated as flat regardless of shape.
const MAX_DEPTH: usize = 48;

/// Cap on visited piece pairs in the curve-curve search.
const MAX_STEPS: usize = 1 << 16;

/// Crossings closer than this many flatness tolerances are merged.
const MERGE_FACTOR: f64 = 100.0;

/// Crossings of a Bezier curve with a line.
///
/// The signed distances of the control points to the line are the Bernstein
/// coefficients of the distance along the curve, so a piece whose
/// coefficients change sign at most once holds at most one crossing.
/// Pieces with no sign change are dropped; pieces with several are split.
///
/// A curve whose control points all lie on the line lies on it entirely
/// and is reported as degenerate.
pub(super) fn bezier_line(curve: &Bezier, line: &Line, params: &SolverParams) -> Result<Vec<Point2>> {
    let pts = curve.control_points();
    let scale = pts.iter().map(|p| p.coords.amax()).fold(1.0, f64::max);
    if pts.iter().all(|p| line.implicit_value(p.x, p.y).abs() <= TOLERANCE * scale) {
        return Err(GeometryError::Degenerate("bezier curve lies on the line; infinitely many intersections".into()).into());
    }
    let mut roots = Vec::new();
    isolate(line, *curve, (0.0, 1.0), 0, params, &mut roots)?;
    roots.sort_by(f64::total_cmp);
    Ok(roots.into_iter().map(|t| curve.evaluate(t)).collect())
}

fn isolate(
    line: &Line,
    piece: Bezier,
    (t0, t1): (f64, f64),
    depth: usize,
    params: &SolverParams,
    roots: &mut Vec<f64>,
) -> Result<()> {
    let coeffs: Vec<f64> = piece
        .control_points()
        .iter()
        .map(|p| line.implicit_value(p.x, p.y))
        .collect();
    let first = coeffs[0];
    let last = coeffs[coeffs.len() - 1];
    if first == 0.0 {
        roots.push(t0);
    }
    if last == 0.0 {
        roots.push(t1);
    }

    let variations = sign_variations(&coeffs);
    if variations == 0 {
        return Ok(());
    }
    let bracketed = first * last < 0.0;
    if (variations == 1 && bracketed) || depth >= MAX_DEPTH {
        if bracketed {
            let g = |u: f64| {
                let p = piece.evaluate(u);
                line.implicit_value(p.x, p.y)
            };
            let u = find_root(g, 0.0, 1.0, params)?;
            roots.push(t0 + (t1 - t0) * u);
        }
        return Ok(());
    }

    let (left, right) = piece.split(0.5);
    let mid = 0.5 * (t0 + t1);
    isolate(line, left, (t0, mid), depth + 1, params, roots)?;
    isolate(line, right, (mid, t1), depth + 1, params, roots)
}

/// Sign changes in a coefficient sequence, skipping zeros.
fn sign_variations(coeffs: &[f64]) -> usize {
    let mut count = 0;
    let mut prev: Option<bool> = None;
    for &c in coeffs.iter().filter(|c| **c != 0.0) {
        let positive = c > 0.0;
        if prev.is_some_and(|p| p != positive) {
            count += 1;
        }
        prev = Some(positive);
    }
    count
}

/// Crossings of two Bezier curves.
///
/// Both curves are split in halves while their bounding boxes overlap, until
/// each piece is flat to within tolerance; the chords of flat pieces are
/// then intersected.
///
/// # Errors
///
/// Returns [`SolveError::Convergence`] when the search visits too many piece
/// pairs, which happens for overlapping curves.
pub(super) fn bezier_bezier(a: &Bezier, b: &Bezier) -> Result<Vec<Point2>> {
    let scale = a
        .control_points()
        .iter()
        .chain(b.control_points())
        .fold(1.0_f64, |m, p| m.max(p.x.abs()).max(p.y.abs()));
    let mut search = PairSearch {
        flatness: TOLERANCE * scale,
        steps: 0,
        points: Vec::new(),
    };
    search.visit(*a, *b, 0)?;
    tracing::trace!(steps = search.steps, found = search.points.len(), "bezier pair search");

    // Neighbouring flat pieces can report the same crossing.
    let merge = MERGE_FACTOR * search.flatness;
    let mut merged: Vec<Point2> = Vec::with_capacity(search.points.len());
    for p in search.points {
        if !merged.iter().any(|q| (q - p).norm() <= merge) {
            merged.push(p);
        }
    }
    Ok(merged)
}

struct PairSearch {
    flatness: f64,
    steps: usize,
    points: Vec<Point2>,
}

impl PairSearch {
    fn visit(&mut self, a: Bezier, b: Bezier, depth: usize) -> Result<()> {
        self.steps += 1;
        if self.steps > MAX_STEPS {
            let (min, max) = a.bounding_box();
            tracing::debug!(depth, "bezier pair search exceeded its step cap");
            return Err(SolveError::Convergence {
                iterations: MAX_STEPS,
                width: (max - min).norm(),
            }
            .into());
        }
        if !boxes_overlap(a.bounding_box(), b.bounding_box(), self.flatness) {
            return Ok(());
        }

        let a_flat = flatness(&a) <= self.flatness;
        let b_flat = flatness(&b) <= self.flatness;
        if (a_flat && b_flat) || depth >= MAX_DEPTH {
            if let Some((p, _, _)) = segment_segment_intersect_2d(&a.start(), &a.end(), &b.start(), &b.end()) {
                self.points.push(p);
            }
            return Ok(());
        }

        match (a_flat, b_flat) {
            (true, _) => {
                let (b1, b2) = b.split(0.5);
                self.visit(a, b1, depth + 1)?;
                self.visit(a, b2, depth + 1)
            }
            (false, true) => {
                let (a1, a2) = a.split(0.5);
                self.visit(a1, b, depth + 1)?;
                self.visit(a2, b, depth + 1)
            }
            (false, false) => {
                let (a1, a2) = a.split(0.5);
                let (b1, b2) = b.split(0.5);
                self.visit(a1, b1, depth + 1)?;
                self.visit(a1, b2, depth + 1)?;
                self.visit(a2, b1, depth + 1)?;
                self.visit(a2, b2, depth + 1)
            }
        }
    }
}

fn boxes_overlap((a_min, a_max): (Point2, Point2), (b_min, b_max): (Point2, Point2), pad: f64) -> bool {
    a_min.x <= b_max.x + pad && b_min.x <= a_max.x + pad && a_min.y <= b_max.y + pad && b_min.y <= a_max.y + pad
}

/// Largest distance of an interior control point from the chord.
fn flatness(curve: &Bezier) -> f64 {
    let pts = curve.control_points();
    let start = curve.start();
    let chord = curve.end() - start;
    let len = chord.norm();
    pts[1..pts.len() - 1]
        .iter()
        .map(|p| {
            let v = p - start;
            if len < TOLERANCE {
                v.norm()
            } else {
                cross(&chord, &v).abs() / len
            }
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn arch() -> Bezier {
        Bezier::cubic(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn arch_crosses_horizontal_line_twice() {
        let line = Line::horizontal(0.5).unwrap();
        let pts = bezier_line(&arch(), &line, &SolverParams::default()).unwrap();
        assert_eq!(pts.len(), 2);
        assert_abs_diff_eq!(pts[0].y, 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(pts[1].y, 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(pts[0].x + pts[1].x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn line_missing_the_hull() {
        let line = Line::horizontal(2.0).unwrap();
        assert!(bezier_line(&arch(), &line, &SolverParams::default()).unwrap().is_empty());
    }

    #[test]
    fn endpoint_on_line() {
        let line = Line::horizontal(0.0).unwrap();
        let pts = bezier_line(&arch(), &line, &SolverParams::default()).unwrap();
        assert!(pts.iter().any(|p| (p - Point2::new(0.0, 0.0)).norm() < 1e-12));
        assert!(pts.iter().any(|p| (p - Point2::new(1.0, 0.0)).norm() < 1e-12));
    }

    #[test]
    fn curve_on_the_line_is_degenerate() {
        let line = Line::from_slope_intercept(2.0, 1.0).unwrap();
        let on_line = Bezier::cubic(
            Point2::new(-1.0, -1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 2.0),
            Point2::new(2.0, 5.0),
        )
        .unwrap();
        let err = bezier_line(&on_line, &line, &SolverParams::default()).unwrap_err();
        assert!(err.is_degenerate());

        let err = super::super::Intersect::new(line, on_line).execute().unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn mirrored_arches_cross_twice() {
        let mirror = Bezier::cubic(
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        )
        .unwrap();
        let pts = bezier_bezier(&arch(), &mirror).unwrap();
        assert_eq!(pts.len(), 2);
        for p in &pts {
            assert_abs_diff_eq!(p.y, 0.5, epsilon = 1e-8);
        }
        assert_abs_diff_eq!(pts[0].x + pts[1].x, 1.0, epsilon = 1e-8);
    }

    #[test]
    fn identical_curves_hit_step_cap() {
        let err = bezier_bezier(&arch(), &arch()).unwrap_err();
        assert!(err.is_convergence());
    }

    #[test]
    fn variations_skip_zeros() {
        assert_eq!(sign_variations(&[1.0, 0.0, -1.0, 2.0]), 2);
        assert_eq!(sign_variations(&[0.0, 1.0, 2.0]), 0);
    }
}
