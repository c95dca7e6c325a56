use crate::{color::Rgb, math8::scale8};

/// Build an RGB color from its components
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
#[allow(clippy::cast_lossless)]
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    (color.r as u32) << 16 | (color.g as u32) << 8 | color.b as u32
}

/// Pack an RGB color into the 16-bit RGB565 format used by the display
#[allow(clippy::cast_lossless)]
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    (r as u16 >> 3) << 11 | (g as u16 >> 2) << 5 | b as u16 >> 3
}

/// Pack a color in the order the LED shifts it in: 0xGGRRBB
///
/// Bit 23 is transmitted first.
#[allow(clippy::cast_lossless)]
pub const fn wire_order(color: Rgb) -> u32 {
    (color.g as u32) << 16 | (color.r as u32) << 8 | color.b as u32
}

/// Scale every channel of a color by the same factor
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}
