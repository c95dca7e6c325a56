#![no_std]

pub mod board;
pub mod button;
pub mod color;
pub mod effect;
pub mod emitter;
pub mod math8;
pub mod pixel;

pub use board::{Board, BoardConfig, BoardError, ButtonPort, Dimmer, FadeConfig, StartupEvent};
pub use button::{Button, ButtonState, Buttons};
pub use color::{Rgb, hsv, rgb};
pub use effect::{EffectId, EffectSlot, Repeat};
pub use emitter::{CycleCounter, PixelEmitter, PulseTimings};
pub use pixel::{Pixel, PixelConfig};

pub use embassy_time::{Duration, Instant};

/// Sink for the colors produced by the effect scheduler
///
/// Implemented by [`PixelEmitter`] for the real LED. Brightness is applied by
/// the driver as the last step before the color goes out.
pub trait OutputDriver {
    /// Show a color on the LED
    fn write(&mut self, color: Rgb);

    /// Set the global brightness (0-255)
    fn set_brightness(&mut self, brightness: u8);
}
