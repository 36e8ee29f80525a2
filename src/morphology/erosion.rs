use rayon::prelude::*;

use crate::raster::WalkableGrid;

/// Shrinks the walkable region to keep the path away from walls.
///
/// Implementations must return a grid with the same dimensions as the input
/// and must never turn a blocked cell walkable. Repeated application may keep
/// eroding.
pub trait Erosion: Sync {
    /// Returns the eroded copy of `grid`.
    fn erode(&self, grid: &WalkableGrid) -> WalkableGrid;
}

impl<F> Erosion for F
where
    F: Fn(&WalkableGrid) -> WalkableGrid + Sync,
{
    fn erode(&self, grid: &WalkableGrid) -> WalkableGrid {
        self(grid)
    }
}

/// Leaves the grid untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoErosion;

impl Erosion for NoErosion {
    fn erode(&self, grid: &WalkableGrid) -> WalkableGrid {
        grid.clone()
    }
}

/// Erosion by a disc of `radius` cells.
///
/// A cell stays walkable only if every cell within Euclidean distance
/// `radius` is inside the grid and walkable. The grid border counts as wall.
#[derive(Debug, Clone)]
pub struct DiskErosion {
    radius: f64,
    offsets: Vec<(i64, i64)>,
}

impl DiskErosion {
    /// Creates a disc erosion. Non-finite or negative radii erode nothing.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(radius: f64) -> Self {
        let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        let reach = radius.floor() as i64;
        let r_sq = radius * radius;

        let mut offsets = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx == 0 && dy == 0) || squared(dx, dy) > r_sq {
                    continue;
                }
                offsets.push((dx, dy));
            }
        }
        Self { radius, offsets }
    }

    /// Disc radius in cells.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

#[allow(clippy::cast_precision_loss)]
fn squared(dx: i64, dy: i64) -> f64 {
    (dx * dx + dy * dy) as f64
}

impl Erosion for DiskErosion {
    fn erode(&self, grid: &WalkableGrid) -> WalkableGrid {
        if self.offsets.is_empty() {
            return grid.clone();
        }
        let cells = grid
            .cells()
            .par_iter()
            .enumerate()
            .map(|(i, &walkable)| {
                if !walkable {
                    return false;
                }
                let p = grid.point_of(i);
                self.offsets
                    .iter()
                    .all(|&(dx, dy)| grid.get(p.x + dx, p.y + dy))
            })
            .collect();
        grid.with_cells(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: usize, height: usize) -> WalkableGrid {
        WalkableGrid::from_cells(width, height, vec![true; width * height])
            .unwrap_or_else(|| WalkableGrid::new(width, height))
    }

    #[test]
    fn zero_radius_is_identity() {
        let grid = WalkableGrid::from_ascii(&[".##.", "####", ".#.."]);
        assert_eq!(DiskErosion::new(0.0).erode(&grid), grid);
        assert_eq!(NoErosion.erode(&grid), grid);
    }

    #[test]
    fn unit_radius_peels_one_ring() {
        let grid = filled(7, 5);
        let eroded = DiskErosion::new(1.0).erode(&grid);
        assert_eq!(eroded.count_walkable(), 5 * 3);
        assert!(!eroded.get(0, 2));
        assert!(eroded.get(1, 1));
    }

    #[test]
    fn never_turns_blocked_walkable() {
        let grid = WalkableGrid::from_ascii(&[
            "#########",
            "#########",
            "####.####",
            "#########",
            "#########",
        ]);
        let eroded = DiskErosion::new(1.5).erode(&grid);
        assert!(eroded.is_subset_of(&grid));
        assert_eq!(eroded.width(), grid.width());
        assert_eq!(eroded.height(), grid.height());
    }

    #[test]
    fn repeated_erosion_keeps_shrinking() {
        let grid = filled(11, 11);
        let erosion = DiskErosion::new(1.0);
        let once = erosion.erode(&grid);
        let twice = erosion.erode(&once);
        assert!(twice.count_walkable() < once.count_walkable());
    }

    #[test]
    fn closures_are_erosions() {
        let clear = |g: &WalkableGrid| WalkableGrid::new(g.width(), g.height());
        let out = clear.erode(&filled(3, 3));
        assert_eq!(out.count_walkable(), 0);
    }

    #[test]
    fn invalid_radius_erodes_nothing() {
        let grid = filled(4, 4);
        assert_eq!(DiskErosion::new(f64::NAN).erode(&grid), grid);
        assert_eq!(DiskErosion::new(-3.0).erode(&grid), grid);
    }
}
