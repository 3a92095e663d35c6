use foundation::{NormRect, PROJECT_PALETTE, Rgb, WORLD_SIDE};

use crate::config::GridConfig;
use crate::viewport::Viewport;
use crate::world::ProjectWorld;

/// Size of a sampled project dot on the minimap.
pub const DOT_SIZE_PX: f64 = 2.0;

/// Upper bound on zones per axis; finer shading than this is invisible on a panel.
pub const MAX_ZONES_PER_AXIS: u32 = 256;

/// Coarse density shading for one block of the world square.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MinimapZone {
    pub rect: NormRect,
    pub color: Rgb,
    pub count: usize,
    pub opacity: f64,
}

/// The whole zone layer sits underneath the dots at this opacity.
pub const ZONE_LAYER_OPACITY: f64 = 0.3;

impl MinimapZone {
    /// Alpha to paint this zone with, layer opacity included.
    pub fn fill_alpha(&self) -> f64 {
        self.opacity * ZONE_LAYER_OPACITY
    }
}

/// A sampled project, positioned as fractions of the panel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MinimapDot {
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
}

/// Whole-world overview, computed once per project set.
///
/// The viewport indicator is not part of the model; it is derived from the
/// current [`Viewport`] on every redraw via [`indicator_rect`].
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapModel {
    zones_per_axis: u32,
    zones: Vec<MinimapZone>,
    dots: Vec<MinimapDot>,
    project_count: usize,
}

impl MinimapModel {
    pub fn build(world: &ProjectWorld, config: &GridConfig) -> Self {
        let n = config.minimap_zones_per_axis.clamp(1, MAX_ZONES_PER_AXIS);
        let mut counts = vec![0usize; (n * n) as usize];
        for project in world.projects() {
            let (x, y) = project.position.coord().fraction();
            let zx = zone_of(x, n);
            let zy = zone_of(y, n);
            counts[(zy * n + zx) as usize] += 1;
        }

        let side = 1.0 / n as f64;
        let zones = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let zx = i as u32 % n;
                let zy = i as u32 / n;
                MinimapZone {
                    rect: NormRect::new(zx as f64 * side, zy as f64 * side, side, side),
                    color: PROJECT_PALETTE[i % PROJECT_PALETTE.len()],
                    count,
                    opacity: (0.3 + count as f64 / 1000.0).min(1.0),
                }
            })
            .collect();

        let stride = config.minimap_sample_stride.max(1);
        let dots = world
            .projects()
            .iter()
            .step_by(stride)
            .map(|p| {
                let (x, y) = p.position.coord().fraction();
                MinimapDot { x, y, color: p.color }
            })
            .collect();

        Self {
            zones_per_axis: n,
            zones,
            dots,
            project_count: world.len(),
        }
    }

    pub fn zones_per_axis(&self) -> u32 {
        self.zones_per_axis
    }

    pub fn zones(&self) -> &[MinimapZone] {
        &self.zones
    }

    pub fn dots(&self) -> &[MinimapDot] {
        &self.dots
    }

    /// Counter shown above the panel, e.g. `30,000`.
    pub fn count_label(&self) -> String {
        format_count(self.project_count)
    }
}

fn zone_of(fraction: f64, n: u32) -> u32 {
    // Indices past WORLD_SIDE^2 sit on a partial extra row with fraction >= 1.
    ((fraction * n as f64).floor() as u32).min(n - 1)
}

/// Viewport indicator as fractions of the panel: top-left at
/// `(col / S, row / S)`, size `(columns / S, rows / S)`.
pub fn indicator_rect(viewport: &Viewport) -> NormRect {
    let side = WORLD_SIDE as f64;
    let (x, y) = viewport.current_coord().fraction();
    NormRect::new(
        x,
        y,
        viewport.columns_per_row() as f64 / side,
        viewport.rows_per_viewport() as f64 / side,
    )
}

/// Converts a panel-relative click into normalized `(x, y)`.
pub fn click_fraction(x_px: f64, y_px: f64, panel_w_px: f64, panel_h_px: f64) -> (f64, f64) {
    let fx = if panel_w_px > 0.0 { x_px / panel_w_px } else { 0.0 };
    let fy = if panel_h_px > 0.0 { y_px / panel_h_px } else { 0.0 };
    (fx, fy)
}

/// Formats with `,` thousands separators.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
