use foundation::{PROJECT_PALETTE, Rgb};
use grid::minimap::{MinimapModel, indicator_rect};
use grid::render::{CellLayout, grid_cells};
use grid::{GridConfig, ProjectWorld, Viewport};
use serde::Serialize;
use site::{ProjectDirectory, ProjectRecord, Route};
use store::{RecordStore, StoreError};

/// One glyph per palette color, in palette order.
const PALETTE_GLYPHS: [char; 5] = ['Y', 'B', 'P', 'G', 'V'];
const EMPTY_GLYPH: char = '.';

fn glyph(color: Rgb) -> char {
    PROJECT_PALETTE
        .iter()
        .position(|c| *c == color)
        .map(|i| PALETTE_GLYPHS[i])
        .unwrap_or('?')
}

/// Text rendering of the visible window, one character per cell, at most
/// `max_rows` rows.
pub fn render_ascii(world: &ProjectWorld, viewport: &Viewport, max_rows: u32) -> String {
    // One "pixel" per cell so x/y come out as column/row.
    let layout = CellLayout {
        cell_size_px: 1.0,
        gap_px: 0.0,
    };
    let columns = viewport.columns_per_row() as usize;
    let mut out = String::new();
    let mut row = String::with_capacity(columns);
    let mut current_row = 0u32;
    for cell in grid_cells(world, viewport, layout, None) {
        let y = cell.y_px as u32;
        if y >= max_rows {
            break;
        }
        if y != current_row {
            out.push_str(&row);
            out.push('\n');
            row.clear();
            current_row = y;
        }
        row.push(if cell.occupied { glyph(cell.color) } else { EMPTY_GLYPH });
    }
    if !row.is_empty() {
        out.push_str(&row);
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    pub zone_x: u32,
    pub zone_y: u32,
    pub count: usize,
    pub opacity: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectReport {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimapReport {
    pub count_label: String,
    pub zones: Vec<ZoneReport>,
    pub dots: usize,
    pub indicator: RectReport,
}

pub fn minimap_report(world: &ProjectWorld, config: &GridConfig, viewport: &Viewport) -> MinimapReport {
    let model = MinimapModel::build(world, config);
    let n = model.zones_per_axis();
    let zones = model
        .zones()
        .iter()
        .enumerate()
        .map(|(i, z)| ZoneReport {
            zone_x: i as u32 % n,
            zone_y: i as u32 / n,
            count: z.count,
            opacity: z.opacity,
            color: z.color.to_css(),
        })
        .collect();
    let r = indicator_rect(viewport);
    MinimapReport {
        count_label: model.count_label(),
        zones,
        dots: model.dots().len(),
        indicator: RectReport {
            x: r.x,
            y: r.y,
            w: r.w,
            h: r.h,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub name: &'static str,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRecord>,
}

pub fn route_report(path: &str, now_ms: u64) -> Result<RouteReport, StoreError> {
    let route = Route::parse(path);
    let project = match route {
        Route::ProjectDetail(id) => ProjectDirectory::new(RecordStore::new(), now_ms).get(id)?,
        _ => None,
    };
    Ok(RouteReport {
        name: route.name(),
        path: route.path(),
        project,
    })
}
