/// Number of addressable cells in the world space.
pub const WORLD_CELLS: u32 = 100_000;

/// Side length of the conceptual square the world space is laid out on.
///
/// `ceil(sqrt(WORLD_CELLS))` would be 317; the grid has always been drawn on a
/// 316-wide square, so indices `>= 316 * 316` spill into a partial extra row.
pub const WORLD_SIDE: u32 = 316;

/// A valid index into the linearized world space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Returns `None` for indices outside `0..WORLD_CELLS`.
    pub fn new(index: u32) -> Option<Self> {
        (index < WORLD_CELLS).then_some(Self(index))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn coord(self) -> GridCoord {
        GridCoord::from_linear(self.0)
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row/column position on the `WORLD_SIDE`-wide square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub row: u32,
    pub col: u32,
}

impl GridCoord {
    pub fn from_linear(index: u32) -> Self {
        Self {
            row: index / WORLD_SIDE,
            col: index % WORLD_SIDE,
        }
    }

    pub fn to_linear(self) -> u64 {
        self.row as u64 * WORLD_SIDE as u64 + self.col as u64
    }

    /// Position as `(x, y)` fractions of the world square.
    pub fn fraction(self) -> (f64, f64) {
        let side = WORLD_SIDE as f64;
        (self.col as f64 / side, self.row as f64 / side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_indices() {
        assert!(CellIndex::new(0).is_some());
        assert!(CellIndex::new(WORLD_CELLS - 1).is_some());
        assert!(CellIndex::new(WORLD_CELLS).is_none());
    }

    #[test]
    fn coord_mapping_is_row_major() {
        let c = CellIndex::new(WORLD_SIDE * 3 + 7).unwrap().coord();
        assert_eq!(c, GridCoord { row: 3, col: 7 });
        assert_eq!(c.to_linear(), (WORLD_SIDE * 3 + 7) as u64);
    }

    #[test]
    fn every_index_round_trips_through_coord() {
        for i in (0..WORLD_CELLS).step_by(97) {
            assert_eq!(GridCoord::from_linear(i).to_linear(), i as u64);
        }
        let last = GridCoord::from_linear(WORLD_CELLS - 1);
        assert_eq!(last.row, 316);
        assert_eq!(last.col, (WORLD_CELLS - 1) % WORLD_SIDE);
    }

    #[test]
    fn fraction_divides_by_side() {
        let (x, y) = GridCoord { row: 158, col: 79 }.fraction();
        assert!((x - 0.25).abs() < 1e-12);
        assert!((y - 0.5).abs() < 1e-12);
    }
}
