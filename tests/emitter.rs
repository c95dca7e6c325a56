mod tests {
    use std::cell::{Cell, RefCell};
    use std::convert::Infallible;
    use std::rc::Rc;

    use embedded_hal::digital::{ErrorType, OutputPin};
    use pocket_board::color::rgb;
    use pocket_board::emitter::{CycleCounter, DEFAULT_BRIGHTNESS, PixelEmitter, PulseTimings};
    use smart_leds::SmartLedsWrite;

    const TIMINGS: PulseTimings = PulseTimings::for_cpu_hz(80_000_000);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Data,
        Lock,
    }

    #[derive(Clone, Default)]
    struct Bus {
        clock: Rc<Cell<u32>>,
        events: Rc<RefCell<Vec<(Line, bool, u32)>>>,
    }

    impl Bus {
        fn starting_at(cycles: u32) -> Self {
            let bus = Self::default();
            bus.clock.set(cycles);
            bus
        }

        fn pin(&self, line: Line) -> SimPin {
            SimPin {
                line,
                bus: self.clone(),
            }
        }

        fn counter(&self) -> SimCounter {
            SimCounter {
                clock: self.clock.clone(),
            }
        }

        fn take(&self) -> Vec<(Line, bool, u32)> {
            self.events.borrow_mut().drain(..).collect()
        }
    }

    /// Advances by one cycle on every read
    struct SimCounter {
        clock: Rc<Cell<u32>>,
    }

    impl CycleCounter for SimCounter {
        fn cycles(&mut self) -> u32 {
            let now = self.clock.get().wrapping_add(1);
            self.clock.set(now);
            now
        }
    }

    struct SimPin {
        line: Line,
        bus: Bus,
    }

    impl ErrorType for SimPin {
        type Error = Infallible;
    }

    impl OutputPin for SimPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let now = self.bus.clock.get();
            self.bus.events.borrow_mut().push((self.line, false, now));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let now = self.bus.clock.get();
            self.bus.events.borrow_mut().push((self.line, true, now));
            Ok(())
        }
    }

    type Emitter = PixelEmitter<SimPin, SimPin, SimCounter>;

    fn emitter(bus: &Bus) -> Emitter {
        let emitter = PixelEmitter::new(
            bus.pin(Line::Data),
            bus.pin(Line::Lock),
            bus.counter(),
            TIMINGS,
        );
        bus.take();
        emitter
    }

    /// (rising edge time, pulse width) of every data pulse
    fn pulses(events: &[(Line, bool, u32)]) -> Vec<(u32, u32)> {
        let mut pulses = Vec::new();
        let mut rising = None;
        for &(line, level, time) in events {
            if line != Line::Data {
                continue;
            }
            match (level, rising) {
                (true, _) => rising = Some(time),
                (false, Some(start)) => {
                    pulses.push((start, time.wrapping_sub(start)));
                    rising = None;
                }
                (false, None) => {}
            }
        }
        pulses
    }

    fn decode(pulses: &[(u32, u32)]) -> u32 {
        pulses.iter().fold(0, |bits, &(_, width)| {
            let bit = if width >= TIMINGS.t1h { 1 } else { 0 };
            bits << 1 | bit
        })
    }

    #[test]
    fn test_timings_at_80_mhz() {
        assert_eq!(
            TIMINGS,
            PulseTimings {
                t0h: 32,
                t1h: 64,
                bit: 100
            }
        );
        assert_eq!(
            PulseTimings::for_cpu_hz(160_000_000),
            PulseTimings {
                t0h: 64,
                t1h: 128,
                bit: 200
            }
        );
    }

    #[test]
    fn test_sends_24_bits_in_grb_order() {
        let bus = Bus::default();
        let mut emitter = emitter(&bus);
        emitter.set_brightness(255);

        emitter.show(rgb(0x12, 0x34, 0x56));

        let pulses = pulses(&bus.take());
        assert_eq!(pulses.len(), 24);
        assert_eq!(decode(&pulses), 0x34_12_56);
    }

    #[test]
    fn test_pulse_widths_and_bit_period() {
        let bus = Bus::default();
        let mut emitter = emitter(&bus);
        emitter.set_brightness(255);

        emitter.show(rgb(0xA5, 0x0F, 0xF0));

        let pulses = pulses(&bus.take());
        for &(_, width) in &pulses {
            assert!(width == TIMINGS.t0h || width == TIMINGS.t1h, "width {width}");
        }
        for pair in pulses.windows(2) {
            assert_eq!(pair[1].0.wrapping_sub(pair[0].0), TIMINGS.bit);
        }
    }

    #[test]
    fn test_counter_wraparound() {
        let bus = Bus::starting_at(u32::MAX - 1000);
        let mut emitter = emitter(&bus);
        emitter.set_brightness(255);

        emitter.show(rgb(0xFF, 0x00, 0xFF));

        let pulses = pulses(&bus.take());
        assert_eq!(pulses.len(), 24);
        assert_eq!(decode(&pulses), 0x00_FF_FF);
        for pair in pulses.windows(2) {
            assert_eq!(pair[1].0.wrapping_sub(pair[0].0), TIMINGS.bit);
        }
    }

    #[test]
    fn test_lock_wraps_transmission() {
        let bus = Bus::default();
        let mut emitter = emitter(&bus);

        emitter.show(rgb(1, 2, 3));

        let events = bus.take();
        let lock: Vec<_> = events.iter().filter(|e| e.0 == Line::Lock).collect();
        assert_eq!(lock.len(), 2);
        assert!(lock[0].1);
        assert!(!lock[1].1);

        let first_data_high = events
            .iter()
            .position(|e| e.0 == Line::Data && e.1)
            .unwrap();
        let last_data_low = events
            .iter()
            .rposition(|e| e.0 == Line::Data && !e.1)
            .unwrap();
        let lock_high = events.iter().position(|e| e.0 == Line::Lock && e.1).unwrap();
        let lock_low = events.iter().position(|e| e.0 == Line::Lock && !e.1).unwrap();
        assert!(lock_high < first_data_high);
        assert!(last_data_low < lock_low);

        let last_data = events.iter().rev().find(|e| e.0 == Line::Data).unwrap();
        assert!(!last_data.1, "data line must idle low");
    }

    #[test]
    fn test_brightness_scales_channels() {
        let bus = Bus::default();
        let mut emitter = emitter(&bus);
        assert_eq!(emitter.brightness(), DEFAULT_BRIGHTNESS);

        emitter.show(rgb(255, 0, 128));
        // (255 * 65) >> 8 = 64, (128 * 65) >> 8 = 32
        assert_eq!(decode(&pulses(&bus.take())), 0x00_40_20);

        emitter.set_brightness(0);
        emitter.show(rgb(255, 255, 255));
        assert_eq!(decode(&pulses(&bus.take())), 0);
    }

    #[test]
    fn test_new_switches_led_off() {
        let bus = Bus::default();
        let _emitter = PixelEmitter::new(
            bus.pin(Line::Data),
            bus.pin(Line::Lock),
            bus.counter(),
            TIMINGS,
        );
        let pulses = pulses(&bus.take());
        assert_eq!(pulses.len(), 24);
        assert_eq!(decode(&pulses), 0);
    }

    #[test]
    fn test_smart_leds_write_shows_first_color() {
        let bus = Bus::default();
        let mut emitter = emitter(&bus);
        emitter.set_brightness(255);

        SmartLedsWrite::write(&mut emitter, [rgb(9, 8, 7), rgb(1, 1, 1)]).unwrap();
        assert_eq!(decode(&pulses(&bus.take())), 0x08_09_07);

        SmartLedsWrite::write(&mut emitter, core::iter::empty::<pocket_board::Rgb>()).unwrap();
        assert_eq!(decode(&pulses(&bus.take())), 0);
    }
}
