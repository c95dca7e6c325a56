//! Bit-banged single-wire driver for the onboard NeoPixel
//!
//! The LED shifts in 24 bits, green first, at 800 kbit/s. Every bit starts
//! with a high pulse whose width encodes the value, so the timing is
//! generated by busy-polling a cycle counter with interrupts masked.
//! A second line opens the transistor lock that powers the LED while a
//! color is being sent.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use smart_leds::SmartLedsWrite;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::color::{BLACK, Rgb, scale_color, wire_order};

/// Brightness applied until [`PixelEmitter::set_brightness`] is called
pub const DEFAULT_BRIGHTNESS: u8 = 0x40;

const BITS_PER_COLOR: u32 = 24;

/// Free-running cycle counter used to time the pulses
///
/// The counter is expected to wrap; only differences between two readings
/// are ever used.
pub trait CycleCounter {
    /// Current counter value
    fn cycles(&mut self) -> u32;
}

/// Pulse widths in counter cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTimings {
    /// High time of a 0 bit (0.4 us)
    pub t0h: u32,
    /// High time of a 1 bit (0.8 us)
    pub t1h: u32,
    /// Total bit period (1.25 us)
    pub bit: u32,
}

impl PulseTimings {
    /// Timings for a counter running at `hz` (32 / 64 / 100 cycles at 80 MHz)
    pub const fn for_cpu_hz(hz: u32) -> Self {
        Self {
            t0h: hz / 2_500_000,
            t1h: hz / 1_250_000,
            bit: hz / 800_000,
        }
    }
}

/// Signal generator for a single NeoPixel
pub struct PixelEmitter<P, L, C> {
    data: P,
    lock: L,
    counter: C,
    timings: PulseTimings,
    brightness: u8,
}

impl<P, L, C> PixelEmitter<P, L, C>
where
    P: OutputPin,
    L: OutputPin,
    C: CycleCounter,
{
    /// Create a new emitter and switch the LED off
    ///
    /// # Arguments
    /// * `data` - Pin wired to the LED data input
    /// * `lock` - Pin driving the transistor lock (usually on the I/O expander)
    /// * `counter` - Cycle counter matching `timings`
    pub fn new(data: P, lock: L, counter: C, timings: PulseTimings) -> Self {
        let mut emitter = Self {
            data,
            lock,
            counter,
            timings,
            brightness: DEFAULT_BRIGHTNESS,
        };
        let _ = emitter.lock.set_low();
        emitter.show(BLACK);
        emitter
    }

    /// Global brightness (0-255) applied to every color sent
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set the global brightness applied to every color sent afterwards
    pub fn set_brightness(&mut self, brightness: u8) {
        #[cfg(feature = "esp32-log")]
        println!("[PixelEmitter.set_brightness] brightness = {}", brightness);
        self.brightness = brightness;
    }

    /// Send a color to the LED
    ///
    /// Takes about 30 us with interrupts masked. Must not be called from an
    /// interrupt handler.
    pub fn show(&mut self, color: Rgb) {
        let bits = wire_order(scale_color(color, self.brightness));

        let _ = self.data.set_low();
        let _ = self.lock.set_high();

        critical_section::with(|_| self.transmit(bits));

        let _ = self.lock.set_low();
    }

    /// Give back the pins and the counter
    pub fn release(self) -> (P, L, C) {
        (self.data, self.lock, self.counter)
    }

    fn transmit(&mut self, bits: u32) {
        let PulseTimings { t0h, t1h, bit } = self.timings;

        // The first bit may start right away.
        let mut start = self.counter.cycles().wrapping_sub(bit);

        for i in (0..BITS_PER_COLOR).rev() {
            let high = if bits & (1 << i) == 0 { t0h } else { t1h };

            let mut now = self.counter.cycles();
            while now.wrapping_sub(start) < bit {
                now = self.counter.cycles();
            }
            let _ = self.data.set_high();
            start = now;

            while self.counter.cycles().wrapping_sub(start) < high {}
            let _ = self.data.set_low();
        }
    }
}

impl<P, L, C> OutputDriver for PixelEmitter<P, L, C>
where
    P: OutputPin,
    L: OutputPin,
    C: CycleCounter,
{
    fn write(&mut self, color: Rgb) {
        self.show(color);
    }

    fn set_brightness(&mut self, brightness: u8) {
        PixelEmitter::set_brightness(self, brightness);
    }
}

/// Only the first color is shown, there is a single LED on the board.
/// An empty iterator switches it off.
impl<P, L, C> SmartLedsWrite for PixelEmitter<P, L, C>
where
    P: OutputPin,
    L: OutputPin,
    C: CycleCounter,
{
    type Error = Infallible;
    type Color = Rgb;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let color = iterator.into_iter().next().map_or(BLACK, Into::into);
        self.show(color);
        Ok(())
    }
}
