use rayon::prelude::*;
use tracing::debug;

use super::{PathData, PathEdge};
use crate::error::Result;
use crate::math::GridPoint;
use crate::raster::WalkableGrid;
use crate::transform::SpaceTransform;

/// Forward neighbour offsets. Visiting cells in row-major order and linking
/// only these four directions reports each 8-adjacency exactly once.
const FORWARD: [(i64, i64); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// A skeleton graph still in grid space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonGraph {
    /// Walkable cells in row-major order.
    pub cells: Vec<GridPoint>,
    /// Edges indexing into `cells`.
    pub edges: Vec<PathEdge>,
}

impl SkeletonGraph {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Maps every cell back to polygon space.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::Invalid` if `radius` is negative or not finite.
    pub fn to_path_data(&self, transform: &SpaceTransform, radius: f64) -> Result<PathData> {
        let points = self
            .cells
            .iter()
            .map(|&c| transform.to_polygon_space(c))
            .collect();
        PathData::new(points, self.edges.clone(), radius)
    }
}

/// Turns a thinned grid into a graph with one vertex per walkable cell and
/// one edge per pair of 8-adjacent walkable cells.
#[derive(Debug)]
pub struct ExtractGraph<'a> {
    grid: &'a WalkableGrid,
}

impl<'a> ExtractGraph<'a> {
    #[must_use]
    pub fn new(grid: &'a WalkableGrid) -> Self {
        Self { grid }
    }

    /// Executes the extraction.
    #[must_use]
    pub fn execute(&self) -> SkeletonGraph {
        let grid = self.grid;

        let mut slots = vec![None; grid.len()];
        let mut cells = Vec::new();
        for (i, &walkable) in grid.cells().iter().enumerate() {
            if walkable {
                slots[i] = Some(cells.len());
                cells.push(grid.point_of(i));
            }
        }

        let slot_at = |x: i64, y: i64| grid.index_of(x, y).and_then(|i| slots[i]);
        let edges: Vec<PathEdge> = cells
            .par_iter()
            .enumerate()
            .flat_map_iter(|(from, cell)| {
                FORWARD.iter().filter_map(move |&(dx, dy)| {
                    slot_at(cell.x + dx, cell.y + dy).map(|to| PathEdge::new(from, to))
                })
            })
            .collect();

        debug!(points = cells.len(), edges = edges.len(), "skeleton graph extracted");
        SkeletonGraph { cells, edges }
    }
}
