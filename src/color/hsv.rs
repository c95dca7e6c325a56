use crate::color::{Rgb, rgb565};

/// Hues per sextant on the 0-255 circle
const SEXTANT_WIDTH: u16 = 43;

/// Convert a hue in degrees (0-359), a saturation and a value to RGB
///
/// Integer-only six-sextant conversion: the hue is first mapped onto a
/// 0-255 circle, split into a sextant and a remainder, and the other
/// channels are derived from signed complements. The output is bit-exact
/// with the classic fixed-point formula, quirks included: at full
/// saturation the darkest channel reads 1, not 0. Hues of 360 and above are
/// not wrapped; callers keep them in range.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub const fn hsv(hue: u16, sat: u8, val: u8) -> Rgb {
    if sat == 0 {
        return Rgb {
            r: val,
            g: val,
            b: val,
        };
    }

    // [0, 359] -> [0, 255]
    let hue = ((hue as u32) << 5) / 45;

    let sextant = (hue / SEXTANT_WIDTH as u32) as u8;
    let remainder = (hue
        .wrapping_sub(sextant as u32 * SEXTANT_WIDTH as u32)
        .wrapping_mul(6)) as u8;

    // Complements are taken on the widened signed value, so `!x == -(x + 1)`
    // and the shifts are arithmetic before the result is cut back to 8 bits.
    let val = val as i32;
    let sat = sat as i32;
    let remainder = remainder as i32;

    let p = ((val * !sat) >> 8) as u8;
    let q = ((val * !(sat * remainder) >> 8) >> 8) as u8;
    let t = ((val * !(sat * !remainder) >> 8) >> 8) as u8;
    let val = val as u8;

    let (r, g, b) = match sextant {
        0 => (val, t, p),
        1 => (q, val, p),
        2 => (p, val, t),
        3 => (p, q, val),
        4 => (t, p, val),
        _ => (val, p, q),
    };

    Rgb { r, g, b }
}

/// Same as [`hsv`], packed as RGB565 for the display
pub const fn hsv565(hue: u16, sat: u8, val: u8) -> u16 {
    let color = hsv(hue, sat, val);
    rgb565(color.r, color.g, color.b)
}
