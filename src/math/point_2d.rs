use super::{Point2, Vector2, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// Midpoint between two points.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

/// Returns true if both coordinates agree within [`TOLERANCE`], scaled by
/// the coordinate magnitude for values larger than one.
#[must_use]
pub fn points_close(a: &Point2, b: &Point2) -> bool {
    scalar_close(a.x, b.x) && scalar_close(a.y, b.y)
}

/// Relative-or-absolute closeness test for two scalars.
#[must_use]
pub fn scalar_close(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= TOLERANCE * scale
}

/// Removes points that are [`points_close`] to an earlier point, keeping
/// first occurrences in order.
#[must_use]
pub fn unique_points(points: &[Point2]) -> Vec<Point2> {
    let mut unique: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|u| points_close(u, p)) {
            unique.push(*p);
        }
    }
    unique
}

/// Translates a point by `delta`.
#[must_use]
pub fn translate(p: &Point2, delta: &Vector2) -> Point2 {
    p + delta
}

/// Rotates a point `theta` radians counter-clockwise about the origin.
#[must_use]
pub fn rotate(p: &Point2, theta: f64) -> Point2 {
    let (s, c) = theta.sin_cos();
    Point2::new(p.x * c - p.y * s, p.x * s + p.y * c)
}

/// Rotates a vector `theta` radians counter-clockwise.
#[must_use]
pub fn rotate_vec(v: &Vector2, theta: f64) -> Vector2 {
    let (s, c) = theta.sin_cos();
    Vector2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// 2D cross product (z-component of the 3D cross product).
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Sorts points by increasing x, breaking ties by increasing y.
pub fn sort_canonical(points: &mut [Point2]) {
    points.sort_by(|a, b| {
        if scalar_close(a.x, b.x) {
            a.y.total_cmp(&b.y)
        } else {
            a.x.total_cmp(&b.x)
        }
    });
}
