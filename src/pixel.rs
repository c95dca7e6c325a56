//! Effect scheduler for the onboard NeoPixel
//!
//! Holds at most one running effect and advances it from the polling loop.
//! Colors go out through an [`OutputDriver`](crate::OutputDriver).

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::color::{BLACK, Rgb};
use crate::effect::{
    BreatheEffect, EffectId, EffectSlot, EffectStep, FlashEffect, RainbowEffect, Repeat,
};
use crate::emitter::DEFAULT_BRIGHTNESS;

/// Configuration for the LED scheduler
#[derive(Debug, Clone, Copy)]
pub struct PixelConfig {
    /// Initial global brightness (0-255)
    pub brightness: u8,
}

impl PixelConfig {
    pub const DEFAULT: Self = Self {
        brightness: DEFAULT_BRIGHTNESS,
    };
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// NeoPixel controller - runs one effect at a time on top of an output driver
///
/// Starting an effect, showing a color or clearing the LED always replaces
/// whatever effect was running. Call [`update`](Self::update) from the
/// polling loop to advance the current effect.
///
/// Not thread-safe: every method must be called from the polling loop.
pub struct Pixel<O: OutputDriver> {
    output: O,
    effect: Option<EffectSlot>,
}

impl<O: OutputDriver> Pixel<O> {
    /// Create a new controller, apply the configured brightness and switch
    /// the LED off
    pub fn new(output: O, config: &PixelConfig) -> Self {
        let mut pixel = Self {
            output,
            effect: None,
        };
        pixel.output.set_brightness(config.brightness);
        pixel.output.write(BLACK);
        pixel
    }

    /// Advance the current effect
    ///
    /// This is the main polling step. Call this continuously.
    pub fn update(&mut self, now: Instant) {
        let Some(effect) = self.effect.as_mut() else {
            return;
        };

        match effect.update(now) {
            EffectStep::Hold => {}
            EffectStep::Show(color) => self.output.write(color),
            EffectStep::Finish => {
                #[cfg(feature = "esp32-log")]
                println!("[Pixel.update] {} finished", effect.id().as_str());
                self.reset();
            }
        }
    }

    /// Set the brightness of the LED (0-255)
    pub fn set_brightness(&mut self, brightness: u8) {
        self.output.set_brightness(brightness);
    }

    /// Show a color, cancelling the current effect
    pub fn show(&mut self, color: Rgb) {
        self.effect = None;
        self.output.write(color);
    }

    /// Turn the LED off, cancelling the current effect
    pub fn clear(&mut self) {
        self.show(BLACK);
    }

    /// Cancel the current effect and turn the LED off
    pub fn reset(&mut self) {
        self.clear();
    }

    /// Make the LED strobe
    ///
    /// # Arguments
    /// * `color` - Color of each flash
    /// * `duration` - How long each flash stays lit
    /// * `count` - Number of flashes, 0 to flash forever
    /// * `period` - Time between the start of two flashes
    ///
    /// The first flash is shown before this returns.
    pub fn flash(&mut self, color: Rgb, duration: Duration, count: u8, period: Duration, now: Instant) {
        let effect = FlashEffect::new(color, duration, period, Repeat::from_count(count), now);
        self.start(EffectSlot::Flash(effect));
    }

    /// Make the LED breathe
    ///
    /// # Arguments
    /// * `color` - Color at the top of each breath
    /// * `period` - Duration of one breath
    /// * `count` - Number of breaths, 0 to breathe forever
    pub fn breathe(&mut self, color: Rgb, period: Duration, count: u8, now: Instant) {
        let effect = BreatheEffect::new(color, period, Repeat::from_count(count), now);
        self.start(EffectSlot::Breathe(effect));
    }

    /// Cycle the LED through the hue circle
    ///
    /// # Arguments
    /// * `period` - Duration of one full cycle
    /// * `count` - Number of cycles, 0 to cycle forever
    pub fn rainbow(&mut self, period: Duration, count: u8, now: Instant) {
        let effect = RainbowEffect::new(period, Repeat::from_count(count), now);
        self.start(EffectSlot::Rainbow(effect));
    }

    /// Replace the current effect
    pub fn start(&mut self, effect: EffectSlot) {
        #[cfg(feature = "esp32-log")]
        println!("[Pixel.start] starting {}", effect.id().as_str());

        if let Some(color) = effect.initial_color() {
            self.output.write(color);
        }
        self.effect = Some(effect);
    }

    /// Get the current effect ID, `None` when no effect is running
    pub fn effect_id(&self) -> Option<EffectId> {
        self.effect.as_ref().map(EffectSlot::id)
    }

    /// Get the current effect
    pub fn effect(&self) -> Option<&EffectSlot> {
        self.effect.as_ref()
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output driver.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
