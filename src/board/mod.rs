//! Board controller
//!
//! Owns the collaborators of the handheld and drives them from a single
//! polling call: screen fades and the startup logo, button sampling and the
//! NeoPixel effects.
//!
//! # Usage
//!
//! ```ignore
//! let mut board = Board::new(port, dac, emitter, &BoardConfig::DEFAULT);
//! draw_logo(&mut display);
//! board.begin(true, Instant::now())?;
//!
//! loop {
//!     if let Some(StartupEvent::ClearScreen) = board.update(Instant::now())? {
//!         display.clear();
//!     }
//!     if board.buttons().pressed(Button::Act) {
//!         board.pixel_mut().flash(rgb(255, 0, 0), Duration::from_millis(100), 1, Duration::from_millis(0), Instant::now());
//!     }
//! }
//! ```

mod fade;
mod startup;

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::button::Buttons;
use crate::pixel::{Pixel, PixelConfig};
use fade::Fader;
pub use fade::{DAC_MAX, FadeConfig};
use startup::StartupSequence;
pub use startup::{StartupEvent, StartupPhase};

pub const PAD_LEFT: u8 = 0x01;
pub const PAD_UP: u8 = 0x02;
pub const PAD_DOWN: u8 = 0x04;
pub const PAD_RIGHT: u8 = 0x08;
pub const PAD_ACT: u8 = 0x10;
pub const PAD_ESC: u8 = 0x20;
pub const PAD_TOP_LEFT: u8 = 0x40;
pub const PAD_TOP_RIGHT: u8 = 0x80;
pub const PAD_ANY: u8 = 0xff;

/// Button port of the I/O expander
pub trait ButtonPort {
    type Error;

    /// Read the raw pin levels, one bit per button, low while pushed
    fn read(&mut self) -> Result<u8, Self::Error>;
}

/// DAC driving the screen backlight
pub trait Dimmer {
    type Error;

    /// Write a 12-bit level (0-4095)
    fn set_level(&mut self, level: u16) -> Result<(), Self::Error>;
}

/// Error raised by one of the board collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError<P, D> {
    /// The button port could not be read
    Buttons(P),
    /// The backlight level could not be written
    Dimmer(D),
}

/// Configuration for the board controller
#[derive(Debug, Clone, Copy)]
pub struct BoardConfig {
    pub fade: FadeConfig,
    /// Time the startup logo stays fully lit
    pub logo_hold: Duration,
    pub pixel: PixelConfig,
}

impl BoardConfig {
    pub const DEFAULT: Self = Self {
        fade: FadeConfig::DEFAULT,
        logo_hold: Duration::from_millis(1000),
        pixel: PixelConfig::DEFAULT,
    };
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Frames counted per wall-clock second
#[derive(Debug, Clone, Default)]
struct FrameCounter {
    second: u64,
    frames: u32,
    fps: u32,
}

impl FrameCounter {
    fn tick(&mut self, now: Instant) {
        let second = now.as_secs();
        if second != self.second {
            self.fps = self.frames;
            self.frames = 0;
            self.second = second;
        }
        self.frames += 1;
    }
}

type BoardResult<T, B, D> = Result<T, BoardError<<B as ButtonPort>::Error, <D as Dimmer>::Error>>;

/// Board controller - the owner of the polling loop
pub struct Board<B: ButtonPort, D: Dimmer, O: OutputDriver> {
    port: B,
    dimmer: D,
    logo_hold: Duration,

    fader: Fader,
    startup: StartupSequence,
    frames: FrameCounter,
    pad: u8,

    buttons: Buttons,
    pixel: Pixel<O>,
}

impl<B: ButtonPort, D: Dimmer, O: OutputDriver> Board<B, D, O> {
    /// Create a new board controller
    ///
    /// The LED is switched off right away; nothing else is touched before
    /// [`begin`](Self::begin).
    pub fn new(port: B, dimmer: D, output: O, config: &BoardConfig) -> Self {
        Self {
            port,
            dimmer,
            logo_hold: config.logo_hold,
            fader: Fader::new(config.fade),
            startup: StartupSequence::running(),
            frames: FrameCounter::default(),
            pad: 0,
            buttons: Buttons::new(),
            pixel: Pixel::new(output, &config.pixel),
        }
    }

    /// Start the board
    ///
    /// With `show_logo`, the screen starts dark and the startup sequence
    /// fades in whatever the caller has drawn. Otherwise the screen is lit
    /// at once.
    pub fn begin(&mut self, show_logo: bool, now: Instant) -> BoardResult<(), B, D> {
        self.frames = FrameCounter::default();
        self.pad = !self.port.read().map_err(BoardError::Buttons)?;

        if show_logo {
            self.set_dac(0)?;
            self.startup = StartupSequence::with_logo(self.logo_hold, &mut self.fader, now);
        } else {
            self.set_dac(DAC_MAX)?;
            self.startup = StartupSequence::running();
        }

        #[cfg(feature = "esp32-log")]
        println!("[Board.begin] show_logo = {}", show_logo);

        Ok(())
    }

    /// Process one frame
    ///
    /// This is the main polling step. Call this continuously.
    pub fn update(&mut self, now: Instant) -> BoardResult<Option<StartupEvent>, B, D> {
        if let Some(level) = self.fader.tick(now) {
            self.set_dac(level)?;
        }

        if !self.startup.is_running() {
            return Ok(self.startup.advance(now, &mut self.fader));
        }

        self.pad = !self.port.read().map_err(BoardError::Buttons)?;
        self.buttons.read(self.pad, now);
        self.pixel.update(now);
        self.frames.tick(now);

        Ok(None)
    }

    /// Last button sample, one bit per button, 1 while pushed
    ///
    /// Zero means no button is touched. Compare with the `PAD_*` masks.
    pub const fn pad(&self) -> u8 {
        self.pad
    }

    /// Debounced button states
    pub const fn buttons(&self) -> &Buttons {
        &self.buttons
    }

    pub const fn pixel(&self) -> &Pixel<O> {
        &self.pixel
    }

    pub fn pixel_mut(&mut self) -> &mut Pixel<O> {
        &mut self.pixel
    }

    /// Number of frames processed during the last full second
    pub const fn fps(&self) -> u32 {
        self.frames.fps
    }

    /// Current startup phase
    pub const fn startup_phase(&self) -> StartupPhase {
        self.startup.phase()
    }

    /// Whether a screen fade is in progress
    pub const fn fading(&self) -> bool {
        self.fader.is_active()
    }

    /// Turn the screen on gradually
    pub fn fade_in(&mut self, now: Instant) {
        self.fader.fade_in(now);
    }

    /// Turn the screen off gradually
    pub fn fade_out(&mut self, now: Instant) {
        self.fader.fade_out(now);
    }

    /// Set the screen brightness level (0-4095)
    pub fn dim(&mut self, level: u16) -> BoardResult<(), B, D> {
        let value = self.fader.config().dac_value(level);
        self.set_dac(value)
    }

    fn set_dac(&mut self, value: u16) -> BoardResult<(), B, D> {
        self.dimmer.set_level(value).map_err(BoardError::Dimmer)
    }
}
