/// 8-bit sRGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_css(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_css_rgba(self, alpha: f64) -> String {
        let a = alpha.clamp(0.0, 1.0);
        format!("rgba({},{},{},{a})", self.r, self.g, self.b)
    }
}

/// Colors used for occupied cells, the minimap and the animated title.
pub const PROJECT_PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0xFACC15),
    Rgb::from_hex(0x38BDF8),
    Rgb::from_hex(0xFB7185),
    Rgb::from_hex(0x4ADE80),
    Rgb::from_hex(0xA78BFA),
];

pub const BACKGROUND: Rgb = Rgb::from_hex(0x000000);
pub const HOVER_OUTLINE: Rgb = Rgb::from_hex(0xFFFFFF);
