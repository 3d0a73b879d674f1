use crate::geometry::{Circle, Ellipse, Line};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Parameters `t` at which `origin + t * dir` meets the circle of `radius`
/// about `center`, in increasing order.
///
/// A discriminant within tolerance of zero is a tangency and yields one
/// parameter.
fn chord_params(origin: &Point2, dir: &Vector2, center: &Point2, radius: f64) -> Vec<f64> {
    let w = origin - center;
    let a = dir.norm_squared();
    let b = dir.dot(&w);
    let c = w.norm_squared() - radius * radius;
    let disc = b * b - a * c;
    let tol = TOLERANCE * a * radius * radius;
    if disc < -tol {
        Vec::new()
    } else if disc <= tol {
        vec![-b / a]
    } else {
        let s = disc.sqrt();
        vec![(-b - s) / a, (-b + s) / a]
    }
}

pub(super) fn line_circle(line: &Line, circle: &Circle) -> Vec<Point2> {
    let dir = line.direction();
    chord_params(line.point(), &dir, circle.center(), circle.radius())
        .into_iter()
        .map(|t| line.point() + dir * t)
        .collect()
}

/// Solved in the frame where the ellipse is the unit circle.
pub(super) fn line_ellipse(line: &Line, ellipse: &Ellipse) -> Vec<Point2> {
    let origin = ellipse.to_local(line.point());
    let dir = ellipse.to_local(&(line.point() + line.direction())) - origin;
    chord_params(&origin, &dir, &Point2::origin(), 1.0)
        .into_iter()
        .map(|t| ellipse.from_local(&(origin + dir * t)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Implicit;
    use approx::assert_abs_diff_eq;

    #[test]
    fn secant_through_center() {
        let c = Circle::new(Point2::new(1.0, 1.0), 2.0).unwrap();
        let l = Line::horizontal(1.0).unwrap();
        let pts = line_circle(&l, &c);
        assert_eq!(pts.len(), 2);
        assert_abs_diff_eq!(pts[0], Point2::new(-1.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(pts[1], Point2::new(3.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn tangent_and_miss() {
        let c = Circle::new(Point2::origin(), 1.0).unwrap();
        let pts = line_circle(&Line::horizontal(1.0).unwrap(), &c);
        assert_eq!(pts.len(), 1);
        assert_abs_diff_eq!(pts[0], Point2::new(0.0, 1.0), epsilon = 1e-12);
        assert!(line_circle(&Line::vertical(1.5).unwrap(), &c).is_empty());
    }

    #[test]
    fn ellipse_crossings_lie_on_both() {
        let e = Ellipse::new(Point2::new(0.5, -0.5), 3.0, 1.0, 0.4).unwrap();
        let l = Line::new(Point2::new(0.0, 0.0), 0.3).unwrap();
        let pts = line_ellipse(&l, &e);
        assert_eq!(pts.len(), 2);
        for p in pts {
            assert_abs_diff_eq!(e.implicit_value(p.x, p.y), 0.0, epsilon = 1e-10);
            assert_abs_diff_eq!(l.implicit_value(p.x, p.y), 0.0, epsilon = 1e-10);
        }
    }
}
