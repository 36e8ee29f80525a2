use rayon::prelude::*;
use tracing::{debug, trace, warn};

use super::structuring::{StructuringElement, L_ELEMENTS};
use crate::config::DEFAULT_MAX_THINNING_PASSES;
use crate::raster::WalkableGrid;

/// How the eight structuring elements interact within one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThinningMode {
    /// Each element reads the grid produced by the previous element of the
    /// same pass.
    #[default]
    Chained,
    /// Every element reads the grid as it stood at the start of the pass; a
    /// cell is removed if any element hits it. Removes more per pass but can
    /// break two-cell-wide corridors apart.
    PassSnapshot,
}

/// Result of a thinning run.
#[derive(Debug, Clone)]
pub struct ThinningOutcome {
    /// The thinned grid.
    pub grid: WalkableGrid,
    /// Number of full passes executed, including the final unchanged one.
    pub passes: usize,
    /// False if the pass limit was reached before a fixed point.
    pub converged: bool,
}

/// Reduces a walkable region to a one-cell-wide skeleton by repeated
/// hit-or-miss thinning with [`L_ELEMENTS`].
///
/// Every sweep reads a frozen snapshot and writes a fresh buffer, so cells
/// are evaluated in parallel. Passes repeat until one removes nothing.
#[derive(Debug)]
pub struct Thinning {
    mode: ThinningMode,
    max_passes: usize,
}

impl Default for Thinning {
    fn default() -> Self {
        Self::new()
    }
}

impl Thinning {
    /// Creates a chained thinning with the default pass limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: ThinningMode::Chained,
            max_passes: DEFAULT_MAX_THINNING_PASSES,
        }
    }

    /// Sets the intra-pass chaining mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ThinningMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the pass limit. Zero is treated as one.
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Executes thinning on `grid`.
    #[must_use]
    pub fn execute(&self, grid: &WalkableGrid) -> ThinningOutcome {
        let mut current = grid.clone();

        for pass in 1..=self.max_passes {
            let (next, removed) = match self.mode {
                ThinningMode::Chained => chained_pass(&current),
                ThinningMode::PassSnapshot => snapshot_pass(&current),
            };
            trace!(pass, removed, "thinning pass");
            current = next;
            if removed == 0 {
                debug!(passes = pass, remaining = current.count_walkable(), "thinning converged");
                return ThinningOutcome {
                    grid: current,
                    passes: pass,
                    converged: true,
                };
            }
        }

        warn!(
            max_passes = self.max_passes,
            remaining = current.count_walkable(),
            "thinning stopped before reaching a fixed point"
        );
        ThinningOutcome {
            grid: current,
            passes: self.max_passes,
            converged: false,
        }
    }
}

/// One element sweep: every walkable cell the element hits becomes blocked.
fn sweep(grid: &WalkableGrid, element: &StructuringElement) -> (WalkableGrid, usize) {
    let cells: Vec<bool> = grid
        .cells()
        .par_iter()
        .enumerate()
        .map(|(i, &walkable)| {
            if !walkable {
                return false;
            }
            let p = grid.point_of(i);
            !element.hits(grid, p.x, p.y)
        })
        .collect();
    let removed = count_removed(grid.cells(), &cells);
    (grid.with_cells(cells), removed)
}

fn chained_pass(grid: &WalkableGrid) -> (WalkableGrid, usize) {
    let mut current = grid.clone();
    let mut removed = 0;
    for element in &L_ELEMENTS {
        let (next, n) = sweep(&current, element);
        current = next;
        removed += n;
    }
    (current, removed)
}

fn snapshot_pass(grid: &WalkableGrid) -> (WalkableGrid, usize) {
    let cells: Vec<bool> = grid
        .cells()
        .par_iter()
        .enumerate()
        .map(|(i, &walkable)| {
            if !walkable {
                return false;
            }
            let p = grid.point_of(i);
            !L_ELEMENTS.iter().any(|e| e.hits(grid, p.x, p.y))
        })
        .collect();
    let removed = count_removed(grid.cells(), &cells);
    (grid.with_cells(cells), removed)
}

fn count_removed(before: &[bool], after: &[bool]) -> usize {
    before
        .par_iter()
        .zip(after)
        .filter(|&(&b, &a)| b && !a)
        .count()
}
