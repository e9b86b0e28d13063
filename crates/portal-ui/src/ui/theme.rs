//! Colours, fonts and layout constants for the switcher surface.

use embedded_graphics::{
    mono_font::{ascii, MonoFont},
    pixelcolor::Rgb565,
    prelude::Size,
};

/// Convert a `0xRRGGBB` colour to the panel's RGB565.
pub const fn rgb(hex: u32) -> Rgb565 {
    Rgb565::new(
        ((hex >> 19) & 0x1F) as u8,
        ((hex >> 10) & 0x3F) as u8,
        ((hex >> 3) & 0x1F) as u8,
    )
}

/// Bitwise complement of a `0xRRGGBB` colour.
pub const fn inverse(hex: u32) -> u32 {
    !hex & 0x00FF_FFFF
}

// ── Palette (0xRRGGBB) ──────────────────────────────────────────────

pub const BACKGROUND: u32 = 0x000000;
pub const WHITE: u32 = 0xFFFFFF;
pub const SELECTED: u32 = 0x00FF00;
pub const CUT_FILL: u32 = 0x000000;
pub const CROSS_FILL: u32 = 0xD5D5D5;
pub const GRAPHICS_FILL: u32 = 0xC10721;
pub const CAMERA_FILL: u32 = 0x094A85;

/// Label font for every button.
pub fn label_font() -> &'static MonoFont<'static> {
    &ascii::FONT_10X20
}

/// Layout constants for the 320×240 panel.
///
/// The top row holds the two transition buttons, the bottom row the
/// graphics key and the four camera keys.
pub mod layout {
    use super::Size;

    /// Height of each button row.
    pub const ROW_H: u32 = 120;

    /// Y of the bottom row.
    pub const BOTTOM_ROW_Y: i32 = ROW_H as i32;

    /// Width of a transition button (half the panel).
    pub const TRANSITION_W: u32 = 160;

    /// Width of a source button (a fifth of the panel).
    pub const SOURCE_W: u32 = 64;

    /// Inset of the drawn shape from the hit bounds.
    pub const MARGIN: Size = Size::new(10, 10);

    /// Inset of the label box from the drawn shape.
    pub const PADDING: Size = Size::new(5, 5);

    /// Corner radius of the rounded button shape.
    pub const CORNER_RADIUS: u32 = 10;

    /// Outline thickness.
    pub const STROKE: u32 = 1;
}
