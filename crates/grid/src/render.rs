use foundation::{BACKGROUND, CellIndex, Rgb};

use crate::config::GridConfig;
use crate::viewport::Viewport;
use crate::world::ProjectWorld;

/// Pixel geometry of one grid cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellLayout {
    pub cell_size_px: f64,
    pub gap_px: f64,
}

impl CellLayout {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            cell_size_px: config.cell_size_px,
            gap_px: config.cell_gap_px,
        }
    }

    pub fn footprint_px(&self) -> f64 {
        self.cell_size_px + self.gap_px
    }
}

/// Draw instruction for one visible cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellDraw {
    pub index: CellIndex,
    pub x_px: f64,
    pub y_px: f64,
    pub size_px: f64,
    pub color: Rgb,
    pub occupied: bool,
    /// Hovered cells get an outline.
    pub outlined: bool,
}

/// Cells `start .. min(start + visible, WORLD_CELLS)` laid out row-major,
/// `columns_per_row` per row. Lookups are O(1) per cell.
pub fn grid_cells<'a>(
    world: &'a ProjectWorld,
    viewport: &Viewport,
    layout: CellLayout,
    hovered: Option<CellIndex>,
) -> impl Iterator<Item = CellDraw> + 'a {
    let start = viewport.start_index();
    let columns = viewport.columns_per_row();
    let footprint = layout.footprint_px();
    (start..viewport.end_index()).filter_map(move |i| {
        let index = CellIndex::new(i)?;
        let offset = i - start;
        let project = world.project_at(index);
        Some(CellDraw {
            index,
            x_px: (offset % columns) as f64 * footprint,
            y_px: (offset / columns) as f64 * footprint,
            size_px: layout.cell_size_px,
            color: project.map(|p| p.color).unwrap_or(BACKGROUND),
            occupied: project.is_some(),
            outlined: hovered == Some(index),
        })
    })
}

/// Pixel extent covered by the full viewport.
pub fn grid_extent_px(viewport: &Viewport, layout: CellLayout) -> (f64, f64) {
    let footprint = layout.footprint_px();
    (
        viewport.columns_per_row() as f64 * footprint,
        viewport.rows_per_viewport() as f64 * footprint,
    )
}
