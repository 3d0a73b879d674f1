pub mod angle_2d;
pub mod derivative;
pub mod extremum;
pub mod intersect_2d;
pub mod point_2d;
pub mod root;

pub use extremum::ExtremumKind;
pub use root::SolverParams;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
