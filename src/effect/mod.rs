//! LED effects with compile-time known variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait and is advanced from the
//! polling loop with the current time; nothing here blocks or sleeps.

mod breathe;
mod flash;
mod rainbow;

use embassy_time::Instant;
pub use breathe::BreatheEffect;
pub use flash::FlashEffect;
pub use rainbow::RainbowEffect;

use crate::color::Rgb;

const EFFECT_NAME_FLASH: &str = "flash";
const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_RAINBOW: &str = "rainbow";

/// What the LED should do after an effect has been advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectStep {
    /// Keep the current color
    Hold,
    /// Send a new color
    Show(Rgb),
    /// The effect is over, the LED goes off
    Finish,
}

pub trait Effect {
    /// Color to show as soon as the effect starts, if any
    fn initial_color(&self) -> Option<Rgb> {
        None
    }

    /// Advance the effect to `now`
    fn update(&mut self, now: Instant) -> EffectStep;
}

/// How many cycles an effect runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Times(u8),
}

impl Repeat {
    /// Convert a raw count, where 0 means forever
    pub const fn from_count(count: u8) -> Self {
        if count == 0 {
            Self::Forever
        } else {
            Self::Times(count)
        }
    }

    /// Check if `cycles` completed cycles use up the repeat count
    pub const fn is_exhausted_by(self, cycles: u64) -> bool {
        match self {
            Self::Forever => false,
            Self::Times(count) => cycles >= count as u64,
        }
    }
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Strobe a color on and off
    Flash(FlashEffect),
    /// Sine-shaped brightness pulses of one color
    Breathe(BreatheEffect),
    /// Cycle through the hue circle
    Rainbow(RainbowEffect),
}

/// Known effect ids for external observation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectId {
    Flash,
    Breathe,
    Rainbow,
}

impl EffectId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flash => EFFECT_NAME_FLASH,
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
        }
    }
}

impl EffectSlot {
    /// Color to show when the effect starts
    pub fn initial_color(&self) -> Option<Rgb> {
        match self {
            Self::Flash(effect) => effect.initial_color(),
            Self::Breathe(effect) => effect.initial_color(),
            Self::Rainbow(effect) => effect.initial_color(),
        }
    }

    /// Advance the current effect
    pub fn update(&mut self, now: Instant) -> EffectStep {
        match self {
            Self::Flash(effect) => effect.update(now),
            Self::Breathe(effect) => effect.update(now),
            Self::Rainbow(effect) => effect.update(now),
        }
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::Flash(_) => EffectId::Flash,
            Self::Breathe(_) => EffectId::Breathe,
            Self::Rainbow(_) => EffectId::Rainbow,
        }
    }
}
