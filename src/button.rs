//! Debounced push buttons
//!
//! All eight buttons are sampled together from one 8-bit port value and
//! filtered with an integrating debouncer (Kenneth A. Kuhn). Each button then
//! walks a small state machine so that presses and releases are reported
//! for exactly one polling tick.

use embassy_time::{Duration, Instant};

/// Number of consecutive active samples needed to report a press
pub const DEBOUNCE_THRESHOLD: u8 = 3;

/// Number of button channels in one port sample
pub const BUTTON_COUNT: usize = 8;

/// Buttons of the handheld, by bit position in the port sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Button {
    Left = 0,
    Up = 1,
    Down = 2,
    Right = 3,
    Act = 4,
    Esc = 5,
    TopLeft = 6,
    TopRight = 7,
}

impl Button {
    /// Bit mask of this button in a port sample
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

impl From<Button> for u8 {
    fn from(button: Button) -> Self {
        button as u8
    }
}

/// Debounced state of a single button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Free,
    /// Pressed during the last tick
    Pressed,
    Held,
    /// Released during the last tick
    Released,
}

#[derive(Debug, Clone, Copy)]
struct ButtonChannel {
    state: ButtonState,
    integrator: u8,
    held_since: Instant,
}

impl ButtonChannel {
    const fn new() -> Self {
        Self {
            state: ButtonState::Free,
            integrator: 0,
            held_since: Instant::from_ticks(0),
        }
    }

    fn sample(&mut self, active: bool, now: Instant) {
        if active {
            if self.integrator < DEBOUNCE_THRESHOLD {
                self.integrator += 1;
            }
        } else {
            self.integrator = self.integrator.saturating_sub(1);
        }

        // Only a saturated integrator counts as pressed, so a press takes
        // `DEBOUNCE_THRESHOLD` samples while a release shows up on the next one.
        let output = self.integrator == DEBOUNCE_THRESHOLD;

        self.state = match (self.state, output) {
            (ButtonState::Free, true) => ButtonState::Pressed,
            (ButtonState::Free, false) => ButtonState::Free,
            (ButtonState::Pressed, true) => {
                self.held_since = now;
                ButtonState::Held
            }
            (ButtonState::Held, true) => ButtonState::Held,
            (ButtonState::Pressed | ButtonState::Held, false) => ButtonState::Released,
            (ButtonState::Released, _) => ButtonState::Free,
        };
    }
}

/// Debounced reader for the eight buttons
///
/// Not thread-safe: [`read`](Self::read) must be called from the same
/// polling loop that queries the states.
#[derive(Debug, Clone)]
pub struct Buttons {
    channels: [ButtonChannel; BUTTON_COUNT],
}

impl Default for Buttons {
    fn default() -> Self {
        Self::new()
    }
}

impl Buttons {
    /// Create a reader with every button free
    pub const fn new() -> Self {
        Self {
            channels: [ButtonChannel::new(); BUTTON_COUNT],
        }
    }

    /// Bulk read all button states
    ///
    /// Bit `i` of `input` is button `i`, 1 meaning the button is currently
    /// pushed. Call once per polling tick.
    pub fn read(&mut self, input: u8, now: Instant) {
        for (i, channel) in self.channels.iter_mut().enumerate() {
            channel.sample(input & (1 << i) != 0, now);
        }
    }

    /// Debounced state of a button (index taken modulo 8)
    pub fn state(&self, button: impl Into<u8>) -> ButtonState {
        self.channel(button).state
    }

    /// Check if a button has just been pressed
    pub fn pressed(&self, button: impl Into<u8>) -> bool {
        self.state(button) == ButtonState::Pressed
    }

    /// Check if a button has just been released
    pub fn released(&self, button: impl Into<u8>) -> bool {
        self.state(button) == ButtonState::Released
    }

    /// Check if a button is held down
    pub fn held(&self, button: impl Into<u8>) -> bool {
        self.state(button) == ButtonState::Held
    }

    /// Check if a button has been held down for at least `min`
    ///
    /// A zero `min` behaves like [`held`](Self::held).
    pub fn held_for(&self, button: impl Into<u8>, min: Duration, now: Instant) -> bool {
        let channel = self.channel(button);
        channel.state == ButtonState::Held
            && (min.as_ticks() == 0 || now.saturating_duration_since(channel.held_since) >= min)
    }

    fn channel(&self, button: impl Into<u8>) -> &ButtonChannel {
        &self.channels[usize::from(button.into() & 0x7)]
    }
}
