//! Joins per-cell segments into polylines by their shared grid edges.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use super::marching::{CellSegment, EdgeCrossings};
use crate::geometry::Polyline;
use crate::math::point_2d::points_close;
use crate::math::Point2;

new_key_type! {
    /// Key of a cell segment in the stitching arena.
    struct SegmentKey;
}

/// Unconsumed segments plus an index from grid edge to the segments that
/// touch it. An interior grid edge is shared by at most two cells.
struct SegmentArena {
    segments: SlotMap<SegmentKey, CellSegment>,
    by_edge: HashMap<usize, Vec<SegmentKey>>,
}

impl SegmentArena {
    fn new(cell_segments: &[CellSegment]) -> (Self, Vec<SegmentKey>) {
        let mut segments = SlotMap::with_key();
        let mut by_edge: HashMap<usize, Vec<SegmentKey>> = HashMap::new();
        let mut order = Vec::with_capacity(cell_segments.len());
        for &seg in cell_segments {
            let key = segments.insert(seg);
            by_edge.entry(seg.0).or_default().push(key);
            by_edge.entry(seg.1).or_default().push(key);
            order.push(key);
        }
        (Self { segments, by_edge }, order)
    }

    /// Removes and returns an unconsumed segment touching `edge`, as the
    /// edge at its other end.
    fn take_at(&mut self, edge: usize) -> Option<usize> {
        let key = self
            .by_edge
            .get(&edge)?
            .iter()
            .copied()
            .find(|k| self.segments.contains_key(*k))?;
        let (a, b) = self.segments.remove(key)?;
        Some(if a == edge { b } else { a })
    }
}

/// Chains segments into polylines.
///
/// Chains are started in the order the segments were produced, which makes
/// the output deterministic. A chain that returns to its first edge is
/// closed; otherwise it is extended in both directions until it reaches the
/// grid boundary or a skipped cell.
pub(super) fn stitch(cell_segments: &[CellSegment], crossings: &EdgeCrossings) -> Vec<Polyline> {
    let (mut arena, order) = SegmentArena::new(cell_segments);
    let mut polylines = Vec::new();

    for key in order {
        let Some((first, second)) = arena.segments.remove(key) else {
            continue;
        };
        let mut forward = vec![first, second];
        let mut closed = false;
        let mut tip = second;
        while let Some(next) = arena.take_at(tip) {
            if next == first {
                closed = true;
                break;
            }
            forward.push(next);
            tip = next;
        }

        let mut edges = if closed {
            forward
        } else {
            let mut backward = Vec::new();
            let mut tail = first;
            while let Some(prev) = arena.take_at(tail) {
                backward.push(prev);
                tail = prev;
            }
            backward.reverse();
            backward.extend(forward);
            backward
        };
        edges.dedup();

        let points = to_points(&edges, crossings, closed);
        if points.len() >= 2 {
            polylines.push(Polyline::new(points, closed));
        }
    }
    tracing::trace!(polylines = polylines.len(), "stitched contour segments");
    polylines
}

/// Looks up crossing points and drops consecutive duplicates.
fn to_points(edges: &[usize], crossings: &EdgeCrossings, closed: bool) -> Vec<Point2> {
    let mut points: Vec<Point2> = Vec::with_capacity(edges.len());
    for p in edges.iter().filter_map(|e| crossings.point(*e)) {
        if points.last().map_or(true, |last| !points_close(last, &p)) {
            points.push(p);
        }
    }
    if closed && points.len() > 1 && points_close(&points[0], &points[points.len() - 1]) {
        points.pop();
    }
    points
}
