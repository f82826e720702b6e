//! Configuration for micropanel.
//!
//! Settings live in `micropanel.toml`, looked up in:
//! 1. the directory given with `--config <dir>`
//! 2. `$XDG_CONFIG_HOME/micropanel/` (usually `~/.config/micropanel/`)
//!
//! A commented default file is written the first time the default location is
//! used. Every key is optional:
//!
//! ```toml
//! #[Preset store]
//! store_url = "http://localhost:5211/api/microwave" # Base URL of the preset store
//! request_timeout = 10                              # Seconds before a store call fails (1-60)
//!
//! #[Panel]
//! default_power = 5                                 # Power after startup and cancel (1-10)
//! delete_grace_period = 3                           # Seconds to hold before a delete fires (1-10)
//! ```

pub mod loading;
pub mod validation;

#[cfg(test)]
mod tests;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;

pub use loading::{create_default_config, get_config_path, load, load_from_path};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Base URL of the preset store.
    pub store_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout: Option<u64>,
    /// Power level used at startup and restored by cancel.
    pub default_power: Option<u8>,
    /// Seconds a delete press has to be held before it fires.
    pub delete_grace_period: Option<u64>,
}

impl Config {
    /// Load from `config_dir`, or from the default location.
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        load(config_dir)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        load_from_path(path)
    }

    pub fn get_config_path(config_dir: Option<&Path>) -> Result<PathBuf> {
        get_config_path(config_dir)
    }

    pub fn store_url(&self) -> &str {
        self.store_url.as_deref().unwrap_or(DEFAULT_STORE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn default_power(&self) -> u8 {
        self.default_power.unwrap_or(DEFAULT_POWER)
    }

    pub fn delete_grace_period(&self) -> Duration {
        Duration::from_secs(
            self.delete_grace_period
                .unwrap_or(DEFAULT_DELETE_GRACE_SECS),
        )
    }

    /// Print the effective settings.
    pub fn log_config(&self, path: Option<&Path>) {
        log_block_start!("Loaded configuration");
        if let Some(path) = path {
            log_indented!("Path: {}", path.display());
        }
        log_indented!("Preset store: {}", self.store_url());
        log_indented!("Request timeout: {}s", self.request_timeout().as_secs());
        log_indented!("Default power: {}", self.default_power());
        log_indented!(
            "Delete grace period: {}s",
            self.delete_grace_period().as_secs()
        );
    }
}
