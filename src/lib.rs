pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{PlotgeomError, Result};
pub use operations::{contour, fit_hobby, intersect, local_extremum, normal_at, tangent_at};
