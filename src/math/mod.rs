pub mod distance_2d;
pub mod grid_point;
pub mod polygon;

pub use grid_point::GridPoint;
pub use polygon::{Bounds, Polygon};

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D point type. `y` is height; the floor plane is XZ.
pub type Point3 = nalgebra::Point3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
