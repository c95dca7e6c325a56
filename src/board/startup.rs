//! Power-on logo sequence
//!
//! Fade the logo in, keep it on screen, fade it out, let the caller clear the
//! screen, then fade back in while the application starts drawing.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::fade::Fader;

/// Events the caller has to act on during startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupEvent {
    /// The logo has faded out, the screen should be cleared now
    ClearScreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPhase {
    LogoFadeIn,
    LogoHold { until: Instant },
    LogoFadeOut,
    Running,
}

#[derive(Debug, Clone)]
pub(crate) struct StartupSequence {
    phase: StartupPhase,
    hold: Duration,
}

impl StartupSequence {
    /// Sequence that is already done
    pub(crate) const fn running() -> Self {
        Self {
            phase: StartupPhase::Running,
            hold: Duration::from_ticks(0),
        }
    }

    /// Start showing the logo, it stays fully lit for `hold`
    pub(crate) fn with_logo(hold: Duration, fader: &mut Fader, now: Instant) -> Self {
        fader.fade_in(now);
        Self {
            phase: StartupPhase::LogoFadeIn,
            hold,
        }
    }

    pub(crate) const fn phase(&self) -> StartupPhase {
        self.phase
    }

    pub(crate) const fn is_running(&self) -> bool {
        matches!(self.phase, StartupPhase::Running)
    }

    /// Move to the next phase once the current one is over
    pub(crate) fn advance(&mut self, now: Instant, fader: &mut Fader) -> Option<StartupEvent> {
        match self.phase {
            StartupPhase::LogoFadeIn if !fader.is_active() => {
                self.set_phase(StartupPhase::LogoHold {
                    until: now + self.hold,
                });
            }
            StartupPhase::LogoHold { until } if now >= until => {
                fader.fade_out(now);
                self.set_phase(StartupPhase::LogoFadeOut);
            }
            StartupPhase::LogoFadeOut if !fader.is_active() => {
                fader.fade_in(now);
                self.set_phase(StartupPhase::Running);
                return Some(StartupEvent::ClearScreen);
            }
            _ => {}
        }
        None
    }

    fn set_phase(&mut self, phase: StartupPhase) {
        #[cfg(feature = "esp32-log")]
        println!("[StartupSequence] {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}
