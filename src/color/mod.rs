mod hsv;
mod utils;

pub use hsv::{hsv, hsv565};
use smart_leds::RGB8;
pub use utils::{rgb, rgb_from_u32, rgb_to_u32, rgb565, scale_color, wire_order};

pub type Rgb = RGB8;

/// LED off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
