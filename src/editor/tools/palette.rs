use crate::geometry::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub color: Color,
}

impl PaletteColor {
    const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name,
            color: Color::new(r, g, b),
        }
    }
}

pub const DEFAULT_DRAW_COLOR: Color = Color::RED;

/// Marker colors offered by the image editor, in display order.
pub const PALETTE: [PaletteColor; 6] = [
    PaletteColor::new("red", 0xff, 0x00, 0x00),
    PaletteColor::new("blue", 0x00, 0x00, 0xff),
    PaletteColor::new("green", 0x00, 0xff, 0x00),
    PaletteColor::new("yellow", 0xff, 0xff, 0x00),
    PaletteColor::new("purple", 0xff, 0x00, 0xff),
    PaletteColor::new("white", 0xff, 0xff, 0xff),
];
