//! Panel controller.
//!
//! [`Panel`] owns the panel state, the preset lists, and the two timers (countdown
//! and delete grace period). It is driven entirely from one thread by:
//!
//! - keypad and button input (the methods below)
//! - [`Panel::poll_timers`] once a deadline from [`Panel::next_deadline`] has passed
//! - [`Panel::handle_reply`] when the preset store answers
//!
//! Store calls go out through a [`StoreGateway`] and never block the panel.
//!
//! - [`countdown`]: starting, pausing and ticking the cook countdown
//! - [`custom`]: creating, activating and deleting custom presets

pub mod countdown;
pub mod custom;
pub mod timer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::*;
use crate::error::PanelError;
use crate::preset::Preset;
use crate::state::{CustomSlots, PanelMode, PanelState};
use crate::store::{RefreshReason, StoreGateway, StoreRequest};
use crate::time_source::Clock;
use crate::ui::{Notice, PanelUi};

use custom::PendingDelete;
use timer::Timer;

/// Tunables the controller reads from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSettings {
    pub default_power: u8,
    pub delete_grace: Duration,
    pub tick_interval: Duration,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            default_power: DEFAULT_POWER,
            delete_grace: Duration::from_secs(DEFAULT_DELETE_GRACE_SECS),
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl From<&Config> for PanelSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_power: config.default_power(),
            delete_grace: config.delete_grace_period(),
            tick_interval: TICK_INTERVAL,
        }
    }
}

pub struct Panel {
    state: PanelState,
    builtins: Vec<Preset>,
    customs: CustomSlots,
    countdown: Option<Timer>,
    pending_delete: Option<PendingDelete>,
    settings: PanelSettings,
    clock: Arc<dyn Clock>,
    debug_enabled: bool,
}

impl Panel {
    pub fn new(settings: PanelSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: PanelState::new(settings.default_power),
            builtins: Vec::new(),
            customs: CustomSlots::default(),
            countdown: None,
            pending_delete: None,
            settings,
            clock,
            debug_enabled: false,
        }
    }

    /// Emit a debug line for every transition.
    pub fn with_debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }

    // # Read access

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn mode(&self) -> PanelMode {
        self.state.mode()
    }

    pub fn builtins(&self) -> &[Preset] {
        &self.builtins
    }

    pub fn customs(&self) -> &CustomSlots {
        &self.customs
    }

    pub fn formatted_time(&self) -> String {
        self.state.formatted_time()
    }

    pub fn power_pattern(&self) -> String {
        self.state.power_pattern(&self.builtins)
    }

    /// Earliest pending timer deadline, if any timer is active.
    pub fn next_deadline(&self) -> Option<Instant> {
        let countdown = self.countdown.map(|timer| timer.deadline());
        let delete = self.pending_delete.as_ref().map(|p| p.timer.deadline());
        match (countdown, delete) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // # Keypad and buttons

    pub fn toggle_setting(&mut self) {
        self.state.setting_power = !self.state.setting_power;
        self.trace(if self.state.setting_power {
            "Keypad now sets power"
        } else {
            "Keypad now sets time"
        });
    }

    /// Keypad digit. Ignored while running.
    pub fn digit(&mut self, digit: u8, ui: &mut dyn PanelUi) {
        if self.state.running || digit > 9 {
            return;
        }

        match self.state.enter_digit(digit) {
            Ok(()) => self.trace(&format!(
                "Digit {digit}: {} @ power {}",
                self.state.formatted_time(),
                self.state.power
            )),
            Err(PanelError::InvalidInput(message)) => ui.notify(Notice::Message(message)),
            Err(e) => ui.notify(Notice::Error(e)),
        }
    }

    /// +30 seconds. Allowed while running; refused for built-in presets.
    pub fn add_thirty(&mut self, ui: &mut dyn PanelUi) {
        match self.state.add_thirty() {
            Ok(()) => self.trace(&format!("Added 30s: {}", self.state.formatted_time())),
            Err(e) => ui.notify(Notice::Error(e)),
        }
    }

    /// Apply a preset's settings. Ignored while running.
    pub fn select_preset(&mut self, preset: &Preset) {
        if self.state.running {
            return;
        }

        self.stop_countdown();
        match self.state.adopt(preset) {
            Ok(()) => self.trace(&format!(
                "Selected '{}': {} @ power {}",
                preset.name,
                self.state.formatted_time(),
                self.state.power
            )),
            Err(e) => {
                log_pipe!();
                log_warning!("{e}");
            }
        }
    }

    /// Select the built-in preset at `index` in store order.
    pub fn select_builtin(&mut self, index: usize) {
        if let Some(preset) = self.builtins.get(index).cloned() {
            self.select_preset(&preset);
        }
    }

    /// Stop everything and return to the initial state.
    pub fn cancel(&mut self) {
        self.stop_countdown();
        self.state.reset(self.settings.default_power);
        self.trace("Cancelled");
    }

    pub fn start_or_pause(&mut self) {
        if self.state.running {
            self.pause_countdown();
        } else {
            self.start_countdown();
        }
    }

    /// Start when idle (30 seconds if no time is set), add 30 seconds when running.
    pub fn start_or_add_thirty(&mut self, ui: &mut dyn PanelUi) {
        if self.state.running {
            self.add_thirty(ui);
        } else {
            if self.state.time_seconds == 0 {
                self.state.time_seconds = ADD_TIME_STEP_SECONDS;
            }
            self.start_countdown();
        }
    }

    pub fn pause_or_cancel(&mut self) {
        if self.state.running {
            self.pause_countdown();
        } else {
            self.cancel();
        }
    }

    // # Timers and store

    /// Fire every timer whose deadline has passed.
    pub fn poll_timers(&mut self, ui: &mut dyn PanelUi, store: &mut dyn StoreGateway) {
        let now = self.clock.now();

        while self.countdown.is_some_and(|timer| timer.is_due(now)) {
            self.tick_countdown(ui);
        }

        if self
            .pending_delete
            .as_ref()
            .is_some_and(|pending| pending.timer.is_due(now))
        {
            self.fire_pending_delete(store);
        }
    }

    /// Ask the store for both preset lists.
    pub fn refresh(&mut self, reason: RefreshReason, store: &mut dyn StoreGateway) {
        self.trace(&format!("Requesting preset list ({reason:?})"));
        store.submit(StoreRequest::Refresh(reason));
    }

    fn report(&self, ui: &mut dyn PanelUi, error: PanelError) {
        self.trace(&format!("Reporting {error:?}"));
        ui.notify(Notice::Error(error));
    }

    fn trace(&self, message: &str) {
        if self.debug_enabled {
            log_debug!("{message}");
        }
    }
}
