use std::ops::RangeInclusive;

use super::WalkableGrid;
use crate::math::GridPoint;

/// Whether a drawn line makes cells walkable or blocks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Mark cells walkable (positive polygon boundary).
    Set,
    /// Mark cells blocked (negative polygon boundary).
    Carve,
}

impl DrawMode {
    /// The cell value this mode writes.
    #[must_use]
    pub fn value(self) -> bool {
        matches!(self, Self::Set)
    }
}

/// One polygon edge in grid space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLine {
    pub start: GridPoint,
    pub end: GridPoint,
}

impl GridLine {
    /// Creates a new grid line.
    #[must_use]
    pub fn new(start: GridPoint, end: GridPoint) -> Self {
        Self { start, end }
    }

    /// Cells covered by the line, sorted and without duplicates.
    ///
    /// The line is stepped one cell at a time along both axes over the
    /// inclusive coordinate range, and the other coordinate is derived from
    /// the slope. Stepping both axes keeps the result 8-connected for any
    /// slope. A derived coordinate rounds up only when its fractional part
    /// exceeds 0.5.
    #[must_use]
    pub fn cells(&self) -> Vec<GridPoint> {
        self.stepped(i64::MIN..=i64::MAX, i64::MIN..=i64::MAX)
    }

    /// Like [`cells`](Self::cells), but only the cells inside a
    /// `width` x `height` grid. Stepping is clipped to the grid first, so the
    /// work is bounded by the grid size however far the endpoints lie.
    #[must_use]
    pub fn cells_within(&self, width: usize, height: usize) -> Vec<GridPoint> {
        let (Some(max_x), Some(max_y)) = (last_index(width), last_index(height)) else {
            return Vec::new();
        };
        let mut cells = self.stepped(0..=max_x, 0..=max_y);
        cells.retain(|c| (0..=max_x).contains(&c.x) && (0..=max_y).contains(&c.y));
        cells
    }

    #[allow(clippy::cast_precision_loss)]
    fn stepped(&self, x_clip: RangeInclusive<i64>, y_clip: RangeInclusive<i64>) -> Vec<GridPoint> {
        let GridPoint { x: x1, y: y1 } = self.start;
        let GridPoint { x: x2, y: y2 } = self.end;
        // Endpoints may sit near the i64 limits; keep all differences in f64.
        let (fx1, fy1) = (x1 as f64, y1 as f64);
        let dx = x2 as f64 - fx1;
        let dy = y2 as f64 - fy1;

        let mut cells = Vec::new();

        let x_from = x1.min(x2).max(*x_clip.start());
        let x_to = x1.max(x2).min(*x_clip.end());
        for x in x_from..=x_to {
            let y = if x1 == x2 {
                y1
            } else {
                snap(fy1 + (x as f64 - fx1) * dy / dx)
            };
            cells.push(GridPoint::new(x, y));
        }

        let y_from = y1.min(y2).max(*y_clip.start());
        let y_to = y1.max(y2).min(*y_clip.end());
        for y in y_from..=y_to {
            let x = if y1 == y2 {
                x1
            } else {
                snap(fx1 + (y as f64 - fy1) * dx / dy)
            };
            cells.push(GridPoint::new(x, y));
        }

        cells.sort_unstable();
        cells.dedup();
        cells
    }

    /// Writes the line into `grid`. Cells outside the grid are skipped.
    pub fn draw(&self, grid: &mut WalkableGrid, mode: DrawMode) {
        let value = mode.value();
        for cell in self.cells_within(grid.width(), grid.height()) {
            grid.set(cell.x, cell.y, value);
        }
    }
}

fn last_index(len: usize) -> Option<i64> {
    len.checked_sub(1).and_then(|n| i64::try_from(n).ok())
}

/// Rounds down unless the fractional part exceeds 0.5. Saturates at the
/// `i64` limits.
#[allow(clippy::cast_possible_truncation)]
fn snap(v: f64) -> i64 {
    let base = v.floor();
    let snapped = if v - base > 0.5 { base + 1.0 } else { base };
    snapped as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: i64, y1: i64, x2: i64, y2: i64) -> GridLine {
        GridLine::new(GridPoint::new(x1, y1), GridPoint::new(x2, y2))
    }

    fn is_eight_connected(cells: &[GridPoint], from: GridPoint, to: GridPoint) -> bool {
        let mut reached = vec![from];
        let mut frontier = vec![from];
        while let Some(c) = frontier.pop() {
            for n in cells {
                if c.chebyshev(n) == 1 && !reached.contains(n) {
                    reached.push(*n);
                    frontier.push(*n);
                }
            }
        }
        reached.contains(&to)
    }

    #[test]
    fn horizontal_line_covers_endpoints() {
        let cells = line(2, 3, 6, 3).cells();
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|c| c.y == 3));
    }

    #[test]
    fn vertical_line_covers_endpoints() {
        let cells = line(4, 7, 4, 1).cells();
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|c| c.x == 4));
    }

    #[test]
    fn single_point_line() {
        assert_eq!(line(1, 1, 1, 1).cells(), vec![GridPoint::new(1, 1)]);
    }

    #[test]
    fn steep_and_shallow_lines_have_no_gaps() {
        for (x1, y1, x2, y2) in [(0, 0, 3, 17), (0, 0, 17, 3), (10, 2, -4, 9), (5, 5, 6, -8)] {
            let l = line(x1, y1, x2, y2);
            let cells = l.cells();
            assert!(cells.contains(&l.start));
            assert!(cells.contains(&l.end));
            assert!(
                is_eight_connected(&cells, l.start, l.end),
                "gap in {x1},{y1} -> {x2},{y2}"
            );
        }
    }

    #[test]
    fn fraction_above_half_rounds_up() {
        assert_eq!(snap(2.5), 2);
        assert_eq!(snap(2.51), 3);
        assert_eq!(snap(-0.4), 0);
        assert_eq!(snap(-0.6), -1);
    }

    #[test]
    fn carve_clears_and_set_marks() {
        let mut grid = WalkableGrid::new(5, 5);
        line(0, 0, 4, 4).draw(&mut grid, DrawMode::Set);
        assert_eq!(grid.count_walkable(), 5);
        line(0, 4, 4, 0).draw(&mut grid, DrawMode::Carve);
        assert!(!grid.get(2, 2));
        assert_eq!(grid.count_walkable(), 4);
    }

    #[test]
    fn extreme_endpoints_are_clipped_to_the_grid() {
        let l = line(i64::MIN, 1, i64::MAX, 1);
        let cells = l.cells_within(4, 4);
        assert_eq!(cells, (0..4).map(|x| GridPoint::new(x, 1)).collect::<Vec<_>>());

        let steep = line(2, i64::MIN, 2, i64::MAX);
        assert_eq!(steep.cells_within(5, 3).len(), 3);

        let mut grid = WalkableGrid::new(6, 6);
        line(-9_000_000_000_000_000_000, 2, 9_000_000_000_000_000_000, 3)
            .draw(&mut grid, DrawMode::Set);
        assert!(grid.count_walkable() >= 6);
        assert!(grid.count_walkable() <= 12);
    }

    #[test]
    fn cells_within_empty_grid() {
        assert!(line(0, 0, 3, 3).cells_within(0, 5).is_empty());
    }

    #[test]
    fn snap_saturates() {
        assert_eq!(snap(1e300), i64::MAX);
        assert_eq!(snap(-1e300), i64::MIN);
    }

    #[test]
    fn drawing_off_grid_is_clipped() {
        let mut grid = WalkableGrid::new(4, 4);
        line(-3, 1, 8, 1).draw(&mut grid, DrawMode::Set);
        assert_eq!(grid.count_walkable(), 4);
    }
}
