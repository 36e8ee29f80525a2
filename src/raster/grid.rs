use crate::math::GridPoint;

/// Row-major boolean raster of walkable cells.
///
/// Reads outside the grid report `false`; writes outside the grid are
/// dropped. This lets polygon edges and structuring elements run off the
/// border without special-casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkableGrid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl WalkableGrid {
    /// Creates a grid with every cell non-walkable.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![false; width * height],
            width,
            height,
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    #[must_use]
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Option<Self> {
        (cells.len() == width * height).then_some(Self {
            cells,
            width,
            height,
        })
    }

    /// A grid with the same dimensions holding `cells`.
    pub(crate) fn with_cells(&self, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            cells,
            width: self.width,
            height: self.height,
        }
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell buffer.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the grid has no cells at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Buffer index of `(x, y)` if it lies inside the grid.
    #[inline]
    #[must_use]
    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Cell coordinates of buffer index `index`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn point_of(&self, index: usize) -> GridPoint {
        GridPoint::new((index % self.width) as i64, (index / self.width) as i64)
    }

    /// Cell value, `false` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.index_of(x, y).is_some_and(|i| self.cells[i])
    }

    /// Sets a cell; out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, value: bool) {
        if let Some(i) = self.index_of(x, y) {
            self.cells[i] = value;
        }
    }

    /// Number of walkable cells.
    #[must_use]
    pub fn count_walkable(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates of every walkable cell in row-major order.
    pub fn walkable_cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(|(i, _)| self.point_of(i))
    }

    /// True if every walkable cell of `self` is walkable in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(&a, &b)| !a || b)
    }

    /// Builds a grid from rows of `#` (walkable) and `.` (blocked).
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let cells = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| b == b'#'))
            .collect();
        Self {
            cells,
            width,
            height,
        }
    }
}
