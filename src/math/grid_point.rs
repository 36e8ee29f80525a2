/// An integer cell coordinate in grid space.
///
/// `x` runs along polygon-space X and `y` along polygon-space Z. Coordinates
/// may be negative or exceed the grid when a polygon reaches outside the
/// positive polygon's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    /// Creates a new grid point.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Chebyshev (king-move) distance to `other`.
    #[must_use]
    pub fn chebyshev(&self, other: &Self) -> i64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl From<(i64, i64)> for GridPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}
