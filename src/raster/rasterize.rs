use tracing::{debug, trace};

use super::{classify_interior, DrawMode, GridLine, WalkableGrid};
use crate::math::Polygon;
use crate::transform::SpaceTransform;

/// Converts a polygon's closed edge loop into grid-space lines.
#[must_use]
pub fn grid_lines(polygon: &Polygon, transform: &SpaceTransform) -> Vec<GridLine> {
    polygon
        .edges()
        .iter()
        .map(|(a, b)| GridLine::new(transform.to_grid_space(a), transform.to_grid_space(b)))
        .collect()
}

/// Produces the initial walkable grid for a room.
///
/// The positive polygon's boundary is drawn walkable and its interior
/// filled. Each negative polygon is then carved out in the order given:
/// its boundary is drawn blocked and its interior cleared against the grid
/// left by the previous polygon. Per-polygon classification is parallel,
/// but polygons are processed one after another.
#[derive(Debug)]
pub struct Rasterize<'a> {
    positive: &'a Polygon,
    negatives: &'a [Polygon],
    transform: SpaceTransform,
}

impl<'a> Rasterize<'a> {
    /// Creates a new rasterization operation.
    #[must_use]
    pub fn new(positive: &'a Polygon, negatives: &'a [Polygon], transform: SpaceTransform) -> Self {
        Self {
            positive,
            negatives,
            transform,
        }
    }

    /// Executes the rasterization.
    #[must_use]
    pub fn execute(&self) -> WalkableGrid {
        let mut grid = WalkableGrid::new(self.transform.grid_width(), self.transform.grid_height());

        let outline = grid_lines(self.positive, &self.transform);
        for line in &outline {
            line.draw(&mut grid, DrawMode::Set);
        }
        let mut grid = classify_interior(&grid, &outline, true);
        debug!(
            walkable = grid.count_walkable(),
            width = grid.width(),
            height = grid.height(),
            "positive polygon rasterized"
        );

        for (n, negative) in self.negatives.iter().enumerate() {
            let outline = grid_lines(negative, &self.transform);
            for line in &outline {
                line.draw(&mut grid, DrawMode::Carve);
            }
            grid = classify_interior(&grid, &outline, false);
            trace!(
                polygon = n,
                walkable = grid.count_walkable(),
                "negative polygon carved"
            );
        }

        grid
    }
}
