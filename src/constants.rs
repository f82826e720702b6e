//! Panel limits, defaults, and store endpoint defaults shared across modules.

use std::time::Duration;

// # Keypad and power limits

/// Longest cook time the keypad accepts, in seconds (2:00).
pub const MAXIMUM_TIME_SECONDS: u32 = 120;

/// Seconds added by the +30 control.
pub const ADD_TIME_STEP_SECONDS: u32 = 30;

pub const MINIMUM_POWER: u8 = 1;
pub const MAXIMUM_POWER: u8 = 10;

/// Power level used at startup and after cancel unless the config overrides it.
pub const DEFAULT_POWER: u8 = 5;

// # Countdown

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Pattern used for a tick when no preset (or an empty pattern) is selected.
pub const DEFAULT_PATTERN: &str = ".";

/// Appended after each tick's pattern run.
pub const TICK_SEPARATOR: char = ' ';

// # Custom slots

pub const CUSTOM_SLOT_CAPACITY: usize = 3;

/// Name carried by a custom slot that holds no persisted preset.
pub const BLANK_SLOT_NAME: &str = "BLANK";

pub const DEFAULT_DELETE_GRACE_SECS: u64 = 3;
pub const MINIMUM_DELETE_GRACE_SECS: u64 = 1;
pub const MAXIMUM_DELETE_GRACE_SECS: u64 = 10;

// # Preset store

pub const DEFAULT_STORE_URL: &str = "http://localhost:5211/api/microwave";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const MINIMUM_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAXIMUM_REQUEST_TIMEOUT_SECS: u64 = 60;

// # Process

pub const CONFIG_FILE_NAME: &str = "micropanel.toml";
pub const CONFIG_DIR_NAME: &str = "micropanel";

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
