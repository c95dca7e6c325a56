//! Rainbow cycling effect
//!
//! Walks the hue circle from 0 to 359 degrees once per `period`, using the
//! integer HSV conversion from [`crate::color::hsv`].

use embassy_time::{Duration, Instant};

use super::{Effect, EffectStep, Repeat};
use crate::color::{Rgb, hsv};

const HUE_DEGREES: u64 = 360;

#[derive(Debug, Clone)]
pub struct RainbowEffect {
    /// Duration of one complete rainbow cycle
    period: Duration,
    repeat: Repeat,
    started: Instant,
    /// Hue (0-359) shown last
    hue: u16,
    /// Brightness value (0-255)
    value: u8,
    /// Saturation (0-255)
    saturation: u8,
}

impl RainbowEffect {
    pub fn new(period: Duration, repeat: Repeat, now: Instant) -> Self {
        Self {
            period,
            repeat,
            started: now,
            hue: 0,
            value: 255,
            saturation: 255,
        }
    }

    /// Set the brightness value
    #[must_use]
    pub fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }

    /// Set the saturation
    #[must_use]
    pub fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = saturation;
        self
    }

    /// Hue shown last
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    fn color(&self) -> Rgb {
        hsv(self.hue, self.saturation, self.value)
    }
}

impl Effect for RainbowEffect {
    fn initial_color(&self) -> Option<Rgb> {
        Some(self.color())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn update(&mut self, now: Instant) -> EffectStep {
        let elapsed = now.saturating_duration_since(self.started).as_ticks();
        let period = self.period.as_ticks().max(1);
        let steps = elapsed * HUE_DEGREES / period;

        if self.repeat.is_exhausted_by(steps / HUE_DEGREES) {
            return EffectStep::Finish;
        }

        let hue = (steps % HUE_DEGREES) as u16;
        if hue == self.hue {
            return EffectStep::Hold;
        }
        self.hue = hue;

        EffectStep::Show(self.color())
    }
}
