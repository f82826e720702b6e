//! Cook countdown.
//!
//! At most one countdown timer exists. Starting replaces any previous timer,
//! stopping is idempotent.

use super::Panel;
use super::timer::Timer;
use crate::ui::{Notice, PanelUi};

impl Panel {
    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    /// Start (or resume) the countdown. Does nothing when no time is set.
    pub(crate) fn start_countdown(&mut self) -> bool {
        if self.state.time_seconds == 0 {
            return false;
        }

        self.stop_countdown();
        self.state.begin_run();
        self.countdown = Some(Timer::repeating(
            self.clock.now(),
            self.settings.tick_interval,
        ));
        self.trace(&format!(
            "Countdown started: {} @ power {}",
            self.state.formatted_time(),
            self.state.power
        ));
        true
    }

    /// Pause, keeping the remaining time and output.
    pub(crate) fn pause_countdown(&mut self) {
        self.countdown = None;
        self.state.pause();
        self.trace(&format!("Paused at {}", self.state.formatted_time()));
    }

    /// Drop the countdown timer without touching the remaining time.
    pub(crate) fn stop_countdown(&mut self) {
        self.countdown = None;
        self.state.running = false;
    }

    pub(crate) fn tick_countdown(&mut self, ui: &mut dyn PanelUi) {
        if self.state.tick() {
            self.countdown = None;
            self.state.finish();
            self.trace("Countdown finished");
            ui.notify(Notice::TimesUp);
        } else if let Some(timer) = self.countdown.as_mut() {
            timer.rearm();
        }
    }
}
