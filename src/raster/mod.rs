mod classify;
mod grid;
mod line;
mod rasterize;

pub use classify::{classify_interior, point_in_polygon, Containment};
pub use grid::WalkableGrid;
pub use line::{DrawMode, GridLine};
pub use rasterize::{grid_lines, Rasterize};
