use std::env;

use grid::GridConfig;

pub const DEFAULT_SEED: u64 = 0x5EED;
pub const DEFAULT_WINDOW_W: f64 = 1280.0;
pub const DEFAULT_WINDOW_H: f64 = 720.0;

/// CLI settings. Every field can be overridden through a `PIXELGRID_*`
/// environment variable; command-line flags win over both.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub grid: GridConfig,
    pub seed: u64,
    pub window_w: f64,
    pub window_h: f64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            seed: DEFAULT_SEED,
            window_w: DEFAULT_WINDOW_W,
            window_h: DEFAULT_WINDOW_H,
        }
    }
}

impl ToolConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let grid = GridConfig {
            cell_size_px: env_var_f64(&lookup, "PIXELGRID_CELL_PX", defaults.grid.cell_size_px),
            cell_gap_px: env_var_f64(&lookup, "PIXELGRID_GAP_PX", defaults.grid.cell_gap_px),
            sidebar_width_px: env_var_f64(
                &lookup,
                "PIXELGRID_SIDEBAR_PX",
                defaults.grid.sidebar_width_px,
            ),
            project_count: env_var_usize(&lookup, "PIXELGRID_PROJECTS", defaults.grid.project_count),
            nudge_step: env_var_u32(&lookup, "PIXELGRID_NUDGE_STEP", defaults.grid.nudge_step),
            ..defaults.grid
        };
        Self {
            grid,
            seed: env_var_u64(&lookup, "PIXELGRID_SEED", defaults.seed),
            window_w: env_var_f64(&lookup, "PIXELGRID_WINDOW_W", defaults.window_w),
            window_h: env_var_f64(&lookup, "PIXELGRID_WINDOW_H", defaults.window_h),
        }
    }
}

fn env_var_u32(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> u32 {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_var_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_var_usize(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_var_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
