use rayon::prelude::*;

use super::{GridLine, WalkableGrid};
use crate::math::GridPoint;

/// Outcome of a point-in-polygon test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Outside,
    /// The ray passed exactly through a polygon vertex, so the crossing
    /// count cannot be trusted. Callers leave such cells unchanged.
    Inconclusive,
}

/// Horizontal ray-crossing test of `point` against a closed loop of edges.
///
/// A ray is cast toward increasing `x` along the cell's row. Horizontal
/// edges never count. Crossings left of the point or outside an edge's
/// span are ignored, and coincident crossings count once. A crossing that
/// lands exactly on an edge endpoint makes the result inconclusive.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn point_in_polygon(edges: &[GridLine], point: GridPoint) -> Containment {
    let px = point.x as f64;
    let py = point.y as f64;
    let mut crossings: Vec<f64> = Vec::new();

    for edge in edges {
        let (x1, y1) = (edge.start.x as f64, edge.start.y as f64);
        let (x2, y2) = (edge.end.x as f64, edge.end.y as f64);

        let ix = if x1 == x2 {
            x1
        } else {
            let a = (y2 - y1) / (x2 - x1);
            if a == 0.0 {
                continue;
            }
            let b = y1 - x1 * a;
            (py - b) / a
        };

        if ix < px {
            continue;
        }
        if ix < x1.min(x2) || ix > x1.max(x2) || py < y1.min(y2) || py > y1.max(y2) {
            continue;
        }
        if (ix == x1 && py == y1) || (ix == x2 && py == y2) {
            return Containment::Inconclusive;
        }
        if !crossings.contains(&ix) {
            crossings.push(ix);
        }
    }

    if crossings.len() % 2 == 1 {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// Sets every cell strictly inside `edges` to `target`.
///
/// Cells already equal to `target` are not tested. Every other cell is
/// classified independently against the frozen input grid, in parallel, and
/// the results are collected into a fresh buffer. Outside and inconclusive
/// cells keep their value.
#[must_use]
pub fn classify_interior(grid: &WalkableGrid, edges: &[GridLine], target: bool) -> WalkableGrid {
    let cells: Vec<bool> = grid
        .cells()
        .par_iter()
        .enumerate()
        .map(|(i, &current)| {
            if current == target {
                return current;
            }
            match point_in_polygon(edges, grid.point_of(i)) {
                Containment::Inside => target,
                Containment::Outside | Containment::Inconclusive => current,
            }
        })
        .collect();

    grid.with_cells(cells)
}
