//! Per-cell marching squares classification.
//!
//! Grid edges are numbered globally so that the two cells sharing an edge
//! refer to the same crossing. Horizontal edges (along x) come first:
//! edge `(r, c)` joins nodes `(r, c)` and `(r, c + 1)` and has id
//! `r * (nx - 1) + c`. Vertical edges follow: edge `(r, c)` joins nodes
//! `(r, c)` and `(r + 1, c)` and has id `H + r * nx + c`, where `H` is the
//! number of horizontal edges.

use crate::geometry::ScalarField;
use crate::math::Point2;

/// A contour piece inside one cell, joining the crossings on two grid edges.
pub(super) type CellSegment = (usize, usize);

/// Crossing points of one level, indexed by grid edge id.
pub(super) struct EdgeCrossings {
    points: Vec<Option<Point2>>,
}

impl EdgeCrossings {
    pub(super) fn point(&self, edge: usize) -> Option<Point2> {
        self.points.get(edge).copied().flatten()
    }
}

/// Classifies every cell against `level`.
///
/// Corners equal to the level count as above it. Cells with a NaN corner
/// are skipped. Saddle cells join their above-level corners when the mean
/// of the four corners is at or above the level, and separate them
/// otherwise.
pub(super) fn march(field: &ScalarField, level: f64) -> (Vec<CellSegment>, EdgeCrossings) {
    let (nx, ny) = (field.nx(), field.ny());
    let horizontal = ny * (nx - 1);
    let total = horizontal + (ny - 1) * nx;
    let mut crossings = EdgeCrossings {
        points: vec![None; total],
    };
    let mut segments = Vec::new();
    let mut saddles = 0_usize;

    for r in 0..ny - 1 {
        for c in 0..nx - 1 {
            // Corners counter-clockwise from (r, c).
            let z = [
                field.value(r, c),
                field.value(r, c + 1),
                field.value(r + 1, c + 1),
                field.value(r + 1, c),
            ];
            if z.iter().any(|v| v.is_nan()) {
                continue;
            }
            let case = z
                .iter()
                .enumerate()
                .fold(0_u8, |acc, (i, v)| if *v >= level { acc | (1 << i) } else { acc });
            if case == 0 || case == 15 {
                continue;
            }

            // Bottom, right, top and left edges of the cell.
            let edges = [
                r * (nx - 1) + c,
                horizontal + r * nx + c + 1,
                (r + 1) * (nx - 1) + c,
                horizontal + r * nx + c,
            ];
            for e in edges {
                if crossings.points[e].is_none() {
                    crossings.points[e] = edge_crossing(field, level, e);
                }
            }
            let [bottom, right, top, left] = edges;

            match case {
                5 | 10 => {
                    saddles += 1;
                    let center = z.iter().sum::<f64>() / 4.0;
                    // Whether the pieces cut off corners 1 and 3 (true) or 0 and 2.
                    let cut_odd = (case == 5) == (center >= level);
                    if cut_odd {
                        segments.push((bottom, right));
                        segments.push((top, left));
                    } else {
                        segments.push((left, bottom));
                        segments.push((right, top));
                    }
                }
                _ => {
                    let above = |i: usize| case & (1 << i) != 0;
                    let crossed: Vec<usize> = [(0, 1, bottom), (1, 2, right), (3, 2, top), (0, 3, left)]
                        .into_iter()
                        .filter(|&(a, b, _)| above(a) != above(b))
                        .map(|(_, _, e)| e)
                        .collect();
                    if let [a, b] = crossed.as_slice() {
                        segments.push((*a, *b));
                    }
                }
            }
        }
    }
    tracing::trace!(level, segments = segments.len(), saddles, "marching squares pass");
    (segments, crossings)
}

/// Linear interpolation of the level along one grid edge.
fn edge_crossing(field: &ScalarField, level: f64, edge: usize) -> Option<Point2> {
    let nx = field.nx();
    let horizontal = field.ny() * (nx - 1);
    let ((r0, c0), (r1, c1)) = if edge < horizontal {
        let (r, c) = (edge / (nx - 1), edge % (nx - 1));
        ((r, c), (r, c + 1))
    } else {
        let id = edge - horizontal;
        let (r, c) = (id / nx, id % nx);
        ((r, c), (r + 1, c))
    };
    let (za, zb) = (field.value(r0, c0), field.value(r1, c1));
    if (za >= level) == (zb >= level) {
        return None;
    }
    let t = ((level - za) / (zb - za)).clamp(0.0, 1.0);
    let (x, y) = (field.x(), field.y());
    Some(Point2::new(
        x[c0] + t * (x[c1] - x[c0]),
        y[r0] + t * (y[r1] - y[r0]),
    ))
}
