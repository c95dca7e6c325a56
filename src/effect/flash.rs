//! Strobe effect
//!
//! The color is lit for `duration` at the start of every `period` and the
//! LED stays off for the rest of it. One flash is one on/off cycle.
//! Flashes are counted against the clock, so a late update finishes the
//! effect instead of replaying the missed flashes.

use embassy_time::{Duration, Instant};

use super::{Effect, EffectStep, Repeat};
use crate::color::{BLACK, Rgb};

#[derive(Debug, Clone)]
pub struct FlashEffect {
    color: Rgb,
    /// Time the color stays lit
    duration: Duration,
    /// Time between the start of two flashes, never shorter than `duration`
    /// and never zero
    period: Duration,
    repeat: Repeat,
    /// Start of the current flash
    started: Instant,
    lit: bool,
    flashes: u64,
}

impl FlashEffect {
    /// Create a flash that is lit from `now`
    pub fn new(
        color: Rgb,
        duration: Duration,
        period: Duration,
        repeat: Repeat,
        now: Instant,
    ) -> Self {
        Self {
            color,
            duration,
            period: period.max(duration).max(Duration::from_ticks(1)),
            repeat,
            started: now,
            lit: true,
            flashes: 0,
        }
    }

    /// Whether the color is currently shown
    pub const fn is_lit(&self) -> bool {
        self.lit
    }

    /// Number of completed flashes
    pub const fn flashes(&self) -> u64 {
        self.flashes
    }
}

impl Effect for FlashEffect {
    fn initial_color(&self) -> Option<Rgb> {
        Some(self.color)
    }

    fn update(&mut self, now: Instant) -> EffectStep {
        let elapsed = now.saturating_duration_since(self.started);
        let was_lit = self.lit;

        if self.lit {
            if elapsed < self.duration {
                return EffectStep::Hold;
            }
            self.lit = false;
            self.flashes += 1;
            if self.repeat.is_exhausted_by(self.flashes) {
                return EffectStep::Finish;
            }
        }

        let dark = if was_lit {
            EffectStep::Show(BLACK)
        } else {
            EffectStep::Hold
        };
        if elapsed < self.period {
            return dark;
        }

        // Catch up with the flash the current time falls into. Flashes whose
        // lit window passed between two updates count as done.
        let cycles = elapsed.as_ticks() / self.period.as_ticks();
        self.started += Duration::from_ticks(cycles * self.period.as_ticks());
        self.flashes += cycles - 1;

        let window_passed = now.saturating_duration_since(self.started) >= self.duration;
        if window_passed {
            self.flashes += 1;
        }
        if self.repeat.is_exhausted_by(self.flashes) {
            return EffectStep::Finish;
        }
        if window_passed {
            return dark;
        }

        self.lit = true;
        EffectStep::Show(self.color)
    }
}
