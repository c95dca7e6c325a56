//! 8-bit fixed-point helpers
//!
//! Everything here runs without floating point so it stays cheap on the
//! microcontroller and bit-exact on the host.

/// First quarter of a sine wave, 64 samples scaled to `0..=125`.
///
/// The other three quadrants are mirrored and complemented by [`sine8`].
pub const QUARTER_SINE: [u8; 64] = [
    0, 0, 0, 0, 1, 1, 1, 2, 2, 3, 4, 5, 6, 6, 8, 9, //
    10, 11, 12, 14, 15, 17, 18, 20, 22, 23, 25, 27, 29, 31, 33, 35, //
    38, 40, 42, 45, 47, 49, 52, 54, 57, 60, 62, 65, 68, 71, 73, 76, //
    79, 82, 85, 88, 91, 94, 97, 100, 103, 106, 109, 113, 116, 119, 122, 125,
];

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Computes `(value * (scale + 1)) >> 8`, so a scale of 255 is the identity.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Brightness envelope over one full 0-255 phase
///
/// Rises from 0 at phase 0 to 255 at phase 127/128 and falls back to 0 at
/// phase 255, following a sine-shaped curve built from [`QUARTER_SINE`].
#[inline]
pub const fn sine8(phase: u8) -> u8 {
    let index = (phase & 0x3f) as usize;
    let mirrored = (!phase & 0x3f) as usize;
    match phase >> 6 {
        0 => QUARTER_SINE[index],
        1 => !QUARTER_SINE[mirrored],
        2 => !QUARTER_SINE[index],
        _ => QUARTER_SINE[mirrored],
    }
}
