//! Panel state and the transitions that only touch state.
//!
//! [`PanelState`] is owned by exactly one [`crate::core::Panel`]. Everything in this
//! module is free of timers and I/O: the controller decides *when* a transition
//! applies, the methods here decide *what* it does.

pub mod slots;

use crate::constants::*;
use crate::error::PanelError;
use crate::preset::Preset;

pub use slots::{CustomSlot, CustomSlots};

/// Coarse panel mode derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Idle,
    Configured,
    Running,
}

impl PanelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelMode::Idle => "idle",
            PanelMode::Configured => "ready",
            PanelMode::Running => "running",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub time_seconds: u32,
    pub power: u8,
    pub running: bool,
    /// Set by a manual pause so the next start resumes instead of starting fresh.
    pub paused: bool,
    /// Keypad digits set the power instead of the time.
    pub setting_power: bool,
    pub output_buffer: String,
    pub selected_preset: Option<Preset>,
    pub instruction: String,
}

impl PanelState {
    pub fn new(default_power: u8) -> Self {
        Self {
            time_seconds: 0,
            power: clamp_power(default_power),
            running: false,
            paused: false,
            setting_power: false,
            output_buffer: String::new(),
            selected_preset: None,
            instruction: String::new(),
        }
    }

    pub fn mode(&self) -> PanelMode {
        if self.running {
            PanelMode::Running
        } else if self.time_seconds > 0 {
            PanelMode::Configured
        } else {
            PanelMode::Idle
        }
    }

    /// Apply one keypad digit. The caller guarantees the panel is not running.
    ///
    /// In power mode the digit becomes the power level. In time mode it is
    /// appended to the current time; an entry that would pass the two minute
    /// limit resets the time and is reported as invalid input.
    pub fn enter_digit(&mut self, digit: u8) -> Result<(), PanelError> {
        if self.setting_power {
            self.power = clamp_power(digit);
            return Ok(());
        }

        let entered = self
            .time_seconds
            .saturating_mul(10)
            .saturating_add(u32::from(digit));
        if entered > MAXIMUM_TIME_SECONDS {
            self.time_seconds = 0;
            self.paused = false;
            return Err(PanelError::invalid(format!(
                "Maximum cook time is {}",
                format_time(MAXIMUM_TIME_SECONDS)
            )));
        }

        self.time_seconds = entered;
        self.paused = false;
        Ok(())
    }

    /// Add thirty seconds unless the session came from a built-in preset.
    pub fn add_thirty(&mut self) -> Result<(), PanelError> {
        if self
            .selected_preset
            .as_ref()
            .is_some_and(Preset::is_builtin)
        {
            return Err(PanelError::invalid(
                "Built-in presets cannot be extended",
            ));
        }
        self.time_seconds = self.time_seconds.saturating_add(ADD_TIME_STEP_SECONDS);
        Ok(())
    }

    /// Take over a preset's time, power, instruction and pattern.
    ///
    /// A preset with a malformed time or power only clears the instruction and
    /// output; time and power stay as they were.
    pub fn adopt(&mut self, preset: &Preset) -> Result<(), PanelError> {
        let (time, power) = match preset.cook_settings() {
            Ok(settings) => settings,
            Err(e) => {
                self.instruction.clear();
                self.output_buffer.clear();
                return Err(e);
            }
        };

        self.time_seconds = time;
        self.power = clamp_power(power);
        self.selected_preset = Some(preset.clone());
        self.instruction = preset.instruction.clone();
        self.output_buffer = preset.pattern.repeat(usize::from(self.power));
        self.running = false;
        self.paused = false;
        Ok(())
    }

    /// Return every field `cancel` touches to its initial value.
    pub fn reset(&mut self, default_power: u8) {
        self.time_seconds = 0;
        self.power = clamp_power(default_power);
        self.running = false;
        self.paused = false;
        self.selected_preset = None;
        self.output_buffer.clear();
        self.instruction.clear();
    }

    /// Mark the countdown as running. A fresh start clears the output; resuming
    /// a manual pause keeps it.
    pub fn begin_run(&mut self) {
        if !self.paused {
            self.output_buffer.clear();
        }
        self.running = true;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.running = false;
        self.paused = true;
    }

    pub fn finish(&mut self) {
        self.running = false;
        self.paused = false;
    }

    /// One countdown step. Returns `true` when the time has run out.
    pub fn tick(&mut self) -> bool {
        if self.time_seconds > 0 {
            self.time_seconds -= 1;
            let run = self.tick_pattern().repeat(usize::from(self.power));
            self.output_buffer.push_str(&run);
            self.output_buffer.push(TICK_SEPARATOR);
        }
        self.time_seconds == 0
    }

    /// The pattern appended per tick: the selected preset's, or the default.
    pub fn tick_pattern(&self) -> &str {
        self.selected_preset
            .as_ref()
            .map(|preset| preset.pattern.as_str())
            .filter(|pattern| !pattern.is_empty())
            .unwrap_or(DEFAULT_PATTERN)
    }

    pub fn minutes_label(&self) -> String {
        format!("{:02}", self.time_seconds / 60)
    }

    pub fn seconds_label(&self) -> String {
        format!("{:02}", self.time_seconds % 60)
    }

    pub fn formatted_time(&self) -> String {
        format_time(self.time_seconds)
    }

    /// The first built-in whose time matches the current time lends its pattern;
    /// otherwise the default pattern is used.
    pub fn power_pattern(&self, builtins: &[Preset]) -> String {
        let pattern = builtins
            .iter()
            .find(|preset| preset.time_seconds == Some(self.time_seconds))
            .map(|preset| preset.pattern.as_str())
            .filter(|pattern| !pattern.is_empty())
            .unwrap_or(DEFAULT_PATTERN);
        pattern.repeat(usize::from(self.power))
    }
}

pub fn clamp_power(power: u8) -> u8 {
    power.clamp(MINIMUM_POWER, MAXIMUM_POWER)
}

/// `MM:SS`, or `00:00` for zero.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PresetOrigin;

    fn preset(name: &str, time: u32, power: u8, pattern: &str, origin: PresetOrigin) -> Preset {
        Preset {
            id: None,
            name: name.to_string(),
            time_seconds: Some(time),
            power: Some(power),
            pattern: pattern.to_string(),
            instruction: format!("{name} instructions"),
            food: None,
            origin,
        }
    }

    fn enter(state: &mut PanelState, digits: &[u8]) -> Result<(), PanelError> {
        digits.iter().try_for_each(|d| state.enter_digit(*d))
    }

    #[test]
    fn test_digits_accumulate_up_to_two_minutes() {
        let mut state = PanelState::new(DEFAULT_POWER);
        enter(&mut state, &[1, 2, 0]).unwrap();
        assert_eq!(state.time_seconds, 120);
        assert_eq!(state.formatted_time(), "02:00");
        assert_eq!(state.mode(), PanelMode::Configured);
    }

    #[test]
    fn test_digit_past_limit_resets_time() {
        let mut state = PanelState::new(DEFAULT_POWER);
        enter(&mut state, &[1, 2, 0]).unwrap();
        let err = state.enter_digit(1).unwrap_err();
        assert!(matches!(err, PanelError::InvalidInput(_)));
        assert_eq!(state.time_seconds, 0);
        assert_eq!(state.mode(), PanelMode::Idle);
    }

    #[test]
    fn test_leading_zero_is_harmless() {
        let mut state = PanelState::new(DEFAULT_POWER);
        enter(&mut state, &[0, 0, 4, 5]).unwrap();
        assert_eq!(state.time_seconds, 45);
        assert_eq!(state.formatted_time(), "00:45");
    }

    #[test]
    fn test_power_digit_is_clamped_not_accumulated() {
        let mut state = PanelState::new(DEFAULT_POWER);
        state.setting_power = true;
        state.enter_digit(0).unwrap();
        assert_eq!(state.power, 1);
        state.enter_digit(9).unwrap();
        state.enter_digit(7).unwrap();
        assert_eq!(state.power, 7);
        assert_eq!(state.time_seconds, 0);
    }

    #[test]
    fn test_add_thirty_refused_for_builtin() {
        let mut state = PanelState::new(DEFAULT_POWER);
        state
            .adopt(&preset("Popcorn", 30, 7, "*", PresetOrigin::Builtin))
            .unwrap();
        assert!(state.add_thirty().is_err());
        assert_eq!(state.time_seconds, 30);
    }

    #[test]
    fn test_add_thirty_allowed_for_custom_and_manual() {
        let mut state = PanelState::new(DEFAULT_POWER);
        state.add_thirty().unwrap();
        assert_eq!(state.time_seconds, 30);

        state
            .adopt(&preset("Tea", 45, 8, "t", PresetOrigin::Custom))
            .unwrap();
        state.add_thirty().unwrap();
        assert_eq!(state.time_seconds, 75);
    }

    #[test]
    fn test_adopt_builtin_sets_output() {
        let mut state = PanelState::new(DEFAULT_POWER);
        state
            .adopt(&preset("Popcorn", 30, 7, "*", PresetOrigin::Builtin))
            .unwrap();
        assert_eq!(state.time_seconds, 30);
        assert_eq!(state.power, 7);
        assert_eq!(state.output_buffer, "*******");
        assert_eq!(state.instruction, "Popcorn instructions");
    }

    #[test]
    fn test_adopt_malformed_clears_display_only() {
        let mut state = PanelState::new(DEFAULT_POWER);
        enter(&mut state, &[4, 0]).unwrap();
        state.instruction = "old".into();
        state.output_buffer = "xx".into();

        let mut bad = preset("Odd", 10, 3, "o", PresetOrigin::Builtin);
        bad.power = None;
        assert!(matches!(
            state.adopt(&bad),
            Err(PanelError::MalformedPreset(_))
        ));
        assert_eq!(state.time_seconds, 40);
        assert_eq!(state.power, DEFAULT_POWER);
        assert!(state.instruction.is_empty());
        assert!(state.output_buffer.is_empty());
        assert!(state.selected_preset.is_none());
    }

    #[test]
    fn test_tick_appends_pattern_and_separator() {
        let mut state = PanelState::new(3);
        state
            .adopt(&preset("Hash", 2, 3, "#", PresetOrigin::Custom))
            .unwrap();
        state.begin_run();
        assert!(state.output_buffer.is_empty());

        assert!(!state.tick());
        assert_eq!(state.time_seconds, 1);
        assert_eq!(state.output_buffer, "### ");

        assert!(state.tick());
        assert_eq!(state.time_seconds, 0);
        assert_eq!(state.output_buffer, "### ### ");
    }

    #[test]
    fn test_tick_uses_dot_without_selection() {
        let mut state = PanelState::new(2);
        state.time_seconds = 5;
        state.begin_run();
        state.tick();
        assert_eq!(state.output_buffer, ".. ");
    }

    #[test]
    fn test_resume_keeps_output() {
        let mut state = PanelState::new(1);
        state.time_seconds = 5;
        state.begin_run();
        state.tick();
        state.pause();
        state.begin_run();
        assert_eq!(state.output_buffer, ". ");
    }

    #[test]
    fn test_labels_and_formatting() {
        let mut state = PanelState::new(DEFAULT_POWER);
        assert_eq!(state.formatted_time(), "00:00");
        state.time_seconds = 75;
        assert_eq!(state.minutes_label(), "01");
        assert_eq!(state.seconds_label(), "15");
        assert_eq!(state.formatted_time(), "01:15");
    }

    #[test]
    fn test_power_pattern_matches_builtin_by_time() {
        let builtins = vec![
            preset("Popcorn", 30, 7, "*", PresetOrigin::Builtin),
            preset("Milk", 30, 5, "~", PresetOrigin::Builtin),
        ];
        let mut state = PanelState::new(3);
        state.time_seconds = 30;
        assert_eq!(state.power_pattern(&builtins), "***");
        state.time_seconds = 31;
        assert_eq!(state.power_pattern(&builtins), "...");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = PanelState::new(DEFAULT_POWER);
        state
            .adopt(&preset("Popcorn", 30, 7, "*", PresetOrigin::Builtin))
            .unwrap();
        state.begin_run();
        state.reset(DEFAULT_POWER);
        assert_eq!(state, PanelState::new(DEFAULT_POWER));
    }
}
