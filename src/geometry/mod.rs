pub mod curve;
pub mod field;
pub mod polyline;
pub mod shape;
pub mod spline;

pub use curve::{Arc, Bezier, Circle, Curve, CurveDomain, Ellipse, Function, Implicit, Line, Segment, Slope};
pub use field::ScalarField;
pub use polyline::Polyline;
pub use shape::{Shape, ShapeKind};
pub use spline::BezierSpline;
