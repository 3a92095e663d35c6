use foundation::CellIndex;

use crate::render::CellLayout;
use crate::viewport::Viewport;

/// Maps a pointer position over the grid to the world cell under it.
///
/// Gap pixels belong to the cell to their left/above. Positions outside the
/// rendered window (including past the last row or the world end) yield `None`.
pub fn pick_cell(viewport: &Viewport, layout: CellLayout, x_px: f64, y_px: f64) -> Option<CellIndex> {
    if !(x_px >= 0.0 && y_px >= 0.0) {
        return None;
    }
    let footprint = layout.footprint_px();
    if !(footprint > 0.0) {
        return None;
    }
    let col = (x_px / footprint).floor() as u64;
    let row = (y_px / footprint).floor() as u64;
    let columns = viewport.columns_per_row() as u64;
    if col >= columns {
        return None;
    }
    let index = row
        .checked_mul(columns)
        .and_then(|offset| offset.checked_add(viewport.start_index() as u64 + col))?;
    if index >= viewport.end_index() as u64 {
        return None;
    }
    CellIndex::new(index as u32)
}

#[cfg(test)]
mod tests {
    use super::pick_cell;
    use crate::render::CellLayout;
    use crate::viewport::Viewport;

    const LAYOUT: CellLayout = CellLayout {
        cell_size_px: 10.0,
        gap_px: 1.0,
    };

    #[test]
    fn picks_row_major_cells() {
        let v = Viewport::new(500, 50, 10);
        assert_eq!(pick_cell(&v, LAYOUT, 0.0, 0.0).map(|c| c.get()), Some(500));
        assert_eq!(pick_cell(&v, LAYOUT, 25.0, 12.0).map(|c| c.get()), Some(512));
        // Gap pixel at x = 10.5 still belongs to column 0.
        assert_eq!(pick_cell(&v, LAYOUT, 10.5, 0.0).map(|c| c.get()), Some(500));
    }

    #[test]
    fn rejects_outside_positions() {
        let v = Viewport::new(500, 50, 10);
        assert!(pick_cell(&v, LAYOUT, -1.0, 0.0).is_none());
        assert!(pick_cell(&v, LAYOUT, 110.0, 0.0).is_none());
        assert!(pick_cell(&v, LAYOUT, 0.0, 55.0).is_none());
        assert!(pick_cell(&v, LAYOUT, f64::NAN, 0.0).is_none());
    }

    #[test]
    fn far_off_pointer_does_not_overflow() {
        let v = Viewport::new(0, 6045, 93);
        assert!(pick_cell(&v, LAYOUT, 5.0, 1e20).is_none());
        assert!(pick_cell(&v, LAYOUT, 5.0, f64::INFINITY).is_none());
        assert!(pick_cell(&v, LAYOUT, f64::INFINITY, 5.0).is_none());
    }
}
