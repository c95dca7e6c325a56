//! Screen fading
//!
//! The backlight is driven by a DAC. Fades walk a level between
//! `min_level` and `max_level` one step per interval, from the polling loop.

use embassy_time::{Duration, Instant};

/// Highest value accepted by the 12-bit DAC
pub const DAC_MAX: u16 = 4095;

/// Configuration for screen fades
#[derive(Debug, Clone, Copy)]
pub struct FadeConfig {
    /// Level at which the screen is dark
    pub min_level: u16,
    /// Level at which the screen is fully lit
    pub max_level: u16,
    /// Level change per step
    pub step: u16,
    /// Time between two steps
    pub interval: Duration,
}

impl FadeConfig {
    pub const DEFAULT: Self = Self {
        min_level: 650,
        max_level: 1000,
        step: 4,
        interval: Duration::from_millis(10),
    };

    /// DAC value for a screen level
    ///
    /// The end points map to fully off and fully on, anything else is
    /// written as is.
    pub fn dac_value(&self, level: u16) -> u16 {
        if level == self.min_level {
            0
        } else if level == self.max_level {
            DAC_MAX
        } else {
            level.min(DAC_MAX)
        }
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Fader {
    config: FadeConfig,
    level: u16,
    rising: bool,
    active: bool,
    last_step: Instant,
}

impl Fader {
    pub(crate) const fn new(config: FadeConfig) -> Self {
        Self {
            config,
            level: config.min_level,
            rising: true,
            active: false,
            last_step: Instant::from_ticks(0),
        }
    }

    pub(crate) const fn config(&self) -> &FadeConfig {
        &self.config
    }

    pub(crate) const fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn fade_in(&mut self, now: Instant) {
        self.start(self.config.min_level, true, now);
    }

    pub(crate) fn fade_out(&mut self, now: Instant) {
        self.start(self.config.max_level, false, now);
    }

    /// Advance the fade
    ///
    /// Returns the DAC value to write when the level changed.
    pub(crate) fn tick(&mut self, now: Instant) -> Option<u16> {
        if !self.active || now.saturating_duration_since(self.last_step) < self.config.interval {
            return None;
        }

        let FadeConfig {
            min_level,
            max_level,
            step,
            ..
        } = self.config;

        if self.rising && self.level.saturating_add(step) < max_level {
            self.level += step;
        } else if !self.rising && self.level.saturating_sub(step) > min_level {
            self.level -= step;
        } else {
            self.active = false;
            self.level = if self.rising { max_level } else { min_level };
        }
        self.last_step = now;

        Some(self.config.dac_value(self.level))
    }

    fn start(&mut self, level: u16, rising: bool, now: Instant) {
        self.level = level;
        self.rising = rising;
        self.active = true;
        self.last_step = now;
    }
}
