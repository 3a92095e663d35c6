use serde::{Deserialize, Serialize};

/// Layout and generation settings shared by the grid, the minimap and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length of one rendered cell.
    pub cell_size_px: f64,
    /// Gap between neighbouring cells.
    pub cell_gap_px: f64,
    /// Width taken by the persistent sidebar that hosts the minimap.
    pub sidebar_width_px: f64,
    /// Number of projects generated per page load.
    pub project_count: usize,
    /// Horizontal nudge distance in cells; vertical nudges move this many rows.
    pub nudge_step: u32,
    pub minimap_zones_per_axis: u32,
    /// Every n-th project is drawn as a dot on the minimap.
    pub minimap_sample_stride: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 10.0,
            cell_gap_px: 1.0,
            sidebar_width_px: 256.0,
            project_count: 30_000,
            nudge_step: 10,
            minimap_zones_per_axis: 5,
            minimap_sample_stride: 200,
        }
    }
}

impl GridConfig {
    pub fn cell_footprint_px(&self) -> f64 {
        self.cell_size_px + self.cell_gap_px
    }

    /// Area left for the grid once the sidebar is taken out of the window.
    pub fn available_area(&self, window_w: f64, window_h: f64) -> (f64, f64) {
        ((window_w - self.sidebar_width_px).max(0.0), window_h.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::GridConfig;

    #[test]
    fn partial_json_keeps_defaults() {
        let c: GridConfig = serde_json::from_str(r#"{"cell_size_px": 12.0}"#).unwrap();
        assert_eq!(c.cell_size_px, 12.0);
        assert_eq!(c.cell_footprint_px(), 13.0);
        assert_eq!(c.project_count, 30_000);
    }

    #[test]
    fn available_area_subtracts_sidebar() {
        let c = GridConfig::default();
        assert_eq!(c.available_area(1280.0, 720.0), (1024.0, 720.0));
        assert_eq!(c.available_area(100.0, -5.0), (0.0, 0.0));
    }
}
