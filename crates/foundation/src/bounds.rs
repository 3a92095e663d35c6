/// Axis-aligned rectangle expressed as fractions of a panel (`0.0..=1.0` when inside).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NormRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Axis-aligned rectangle in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        NormRect { x, y, w, h }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    pub fn to_pixels(&self, panel_w: f64, panel_h: f64) -> PixelRect {
        PixelRect {
            x: self.x * panel_w,
            y: self.y * panel_h,
            w: self.w * panel_w,
            h: self.h * panel_h,
        }
    }
}
