use std::rc::Rc;

use foundation::{BACKGROUND, HOVER_OUTLINE};
use grid::ProjectWorld;
use grid::minimap::{DOT_SIZE_PX, MinimapModel, indicator_rect};
use grid::render::{grid_cells, grid_extent_px};
use grid::sync::{GridView, MinimapView, ViewportView};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Panel size used for minimap clicks before a canvas is attached.
pub const DEFAULT_MINIMAP_PX: f64 = 224.0;

#[derive(Debug)]
pub struct Canvas {
    pub element: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
}

impl Canvas {
    pub fn from_element_id(id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing {id}")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = element
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { element, ctx })
    }

    fn size(&self) -> (f64, f64) {
        (self.element.width() as f64, self.element.height() as f64)
    }
}

fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(value),
    );
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

/// The full-page grid view plus what it needs to draw itself.
#[derive(Debug)]
pub struct GridPane {
    pub view: GridView,
    pub world: Rc<ProjectWorld>,
    pub canvas: Option<Canvas>,
}

impl GridPane {
    pub fn draw(&self) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        let layout = self.view.layout();
        let viewport = self.view.viewport();
        let (w, h) = grid_extent_px(viewport, layout);
        canvas.element.set_width(w.ceil() as u32);
        canvas.element.set_height(h.ceil() as u32);

        let ctx = &canvas.ctx;
        ctx_set_fill_style(ctx, &BACKGROUND.to_css());
        ctx.fill_rect(0.0, 0.0, w, h);

        let outline = HOVER_OUTLINE.to_css();
        for cell in grid_cells(&self.world, viewport, layout, self.view.hovered()) {
            if cell.occupied {
                ctx_set_fill_style(ctx, &cell.color.to_css());
                ctx.fill_rect(cell.x_px, cell.y_px, cell.size_px, cell.size_px);
            }
            if cell.outlined {
                ctx_set_stroke_style(ctx, &outline);
                ctx.set_line_width(1.0);
                ctx.stroke_rect(
                    cell.x_px + 0.5,
                    cell.y_px + 0.5,
                    cell.size_px - 1.0,
                    cell.size_px - 1.0,
                );
            }
        }
    }
}

/// The sidebar minimap view plus its precomputed overview.
#[derive(Debug)]
pub struct MinimapPane {
    pub view: MinimapView,
    pub model: Rc<MinimapModel>,
    pub canvas: Option<Canvas>,
}

impl MinimapPane {
    pub fn panel_size(&self) -> (f64, f64) {
        self.canvas
            .as_ref()
            .map(Canvas::size)
            .unwrap_or((DEFAULT_MINIMAP_PX, DEFAULT_MINIMAP_PX))
    }

    pub fn draw(&self) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        let ctx = &canvas.ctx;
        let (w, h) = canvas.size();
        ctx_set_fill_style(ctx, &BACKGROUND.to_css());
        ctx.fill_rect(0.0, 0.0, w, h);

        for zone in self.model.zones() {
            let r = zone.rect.to_pixels(w, h);
            // Zones are a faint density hint underneath the sampled dots.
            ctx_set_fill_style(ctx, &zone.color.to_css_rgba(zone.fill_alpha()));
            ctx.fill_rect(r.x, r.y, r.w, r.h);
        }
        for dot in self.model.dots() {
            ctx_set_fill_style(ctx, &dot.color.to_css());
            ctx.fill_rect(dot.x * w, dot.y * h, DOT_SIZE_PX, DOT_SIZE_PX);
        }

        let r = indicator_rect(self.view.viewport()).to_pixels(w, h);
        ctx_set_stroke_style(ctx, &HOVER_OUTLINE.to_css());
        ctx.set_line_width(1.0);
        ctx.stroke_rect(r.x, r.y, r.w.max(1.0), r.h.max(1.0));
    }
}
