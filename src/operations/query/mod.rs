mod extremum;
mod intersect;
mod tangent;

pub use extremum::LocalExtremum;
pub use intersect::{Intersect, Intersection, Which};
pub use tangent::{NormalAt, TangentAt, TangentsThrough};
