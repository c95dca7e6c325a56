//! Breathing effect
//!
//! Pulses one color along a sine-shaped brightness envelope. One breath
//! sweeps the envelope phase from 0 to 255 over `period`, taking the LED
//! from off to full color and back.

use embassy_time::{Duration, Instant};

use super::{Effect, EffectStep, Repeat};
use crate::color::{Rgb, scale_color};
use crate::math8::sine8;

#[derive(Debug, Clone)]
pub struct BreatheEffect {
    color: Rgb,
    period: Duration,
    repeat: Repeat,
    started: Instant,
    /// Last envelope phase sent to the LED
    phase: Option<u8>,
}

impl BreatheEffect {
    pub fn new(color: Rgb, period: Duration, repeat: Repeat, now: Instant) -> Self {
        Self {
            color,
            period,
            repeat,
            started: now,
            phase: None,
        }
    }

    /// Envelope phase (0-255) shown last
    pub const fn phase(&self) -> Option<u8> {
        self.phase
    }
}

impl Effect for BreatheEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn update(&mut self, now: Instant) -> EffectStep {
        let elapsed = now.saturating_duration_since(self.started).as_ticks();
        let period = self.period.as_ticks().max(1);
        let steps = elapsed * 256 / period;

        if self.repeat.is_exhausted_by(steps / 256) {
            return EffectStep::Finish;
        }

        let phase = (steps % 256) as u8;
        if self.phase == Some(phase) {
            return EffectStep::Hold;
        }
        self.phase = Some(phase);

        EffectStep::Show(scale_color(self.color, sine8(phase)))
    }
}
