use crate::raster::WalkableGrid;

/// A 3×3 hit-or-miss mask pair.
///
/// Masks are indexed `[dx + 1][dy + 1]` relative to the tested cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    /// Positions that must be walkable.
    pub foreground: [[bool; 3]; 3],
    /// Positions that must be blocked.
    pub background: [[bool; 3]; 3],
}

const fn mask(bits: [[u8; 3]; 3]) -> [[bool; 3]; 3] {
    let mut out = [[false; 3]; 3];
    let mut a = 0;
    while a < 3 {
        let mut b = 0;
        while b < 3 {
            out[a][b] = bits[a][b] != 0;
            b += 1;
        }
        a += 1;
    }
    out
}

const fn element(foreground: [[u8; 3]; 3], background: [[u8; 3]; 3]) -> StructuringElement {
    StructuringElement {
        foreground: mask(foreground),
        background: mask(background),
    }
}

/// The eight L-shaped Golay elements, applied in this order every pass.
///
/// Each row below is one `dx` column (`-1`, `0`, `+1`), listing `dy`
/// `-1`, `0`, `+1`.
pub const L_ELEMENTS: [StructuringElement; 8] = [
    // Left edge.
    element([[0, 0, 0], [0, 1, 0], [1, 1, 1]], [[1, 1, 1], [0, 0, 0], [0, 0, 0]]),
    // Lower-left corner.
    element([[0, 0, 0], [1, 1, 0], [1, 1, 0]], [[0, 1, 1], [0, 0, 1], [0, 0, 0]]),
    // Lower edge.
    element([[1, 0, 0], [1, 1, 0], [1, 0, 0]], [[0, 0, 1], [0, 0, 1], [0, 0, 1]]),
    // Lower-right corner.
    element([[1, 1, 0], [1, 1, 0], [0, 0, 0]], [[0, 0, 0], [0, 0, 1], [0, 1, 1]]),
    // Right edge.
    element([[1, 1, 1], [0, 1, 0], [0, 0, 0]], [[0, 0, 0], [0, 0, 0], [1, 1, 1]]),
    // Upper-right corner.
    element([[0, 1, 1], [0, 1, 1], [0, 0, 0]], [[0, 0, 0], [1, 0, 0], [1, 1, 0]]),
    // Upper edge.
    element([[0, 0, 1], [0, 1, 1], [0, 0, 1]], [[1, 0, 0], [1, 0, 0], [1, 0, 0]]),
    // Upper-left corner.
    element([[0, 0, 0], [0, 1, 1], [0, 1, 1]], [[1, 1, 0], [1, 0, 0], [0, 0, 0]]),
];

impl StructuringElement {
    /// Hit-or-miss test of this element centred on `(x, y)`.
    ///
    /// Off-grid cells count as blocked: a foreground requirement there is a
    /// miss and a background requirement is always met.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn hits(&self, grid: &WalkableGrid, x: i64, y: i64) -> bool {
        for a in 0..3 {
            for b in 0..3 {
                let walkable = grid.get(x + a as i64 - 1, y + b as i64 - 1);
                if self.foreground[a][b] && !walkable {
                    return false;
                }
                if self.background[a][b] && walkable {
                    return false;
                }
            }
        }
        true
    }
}
