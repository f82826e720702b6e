//! Locating, creating, and reading the configuration file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use super::validation::validate_config;
use crate::constants::*;

/// Path of the config file inside `config_dir`, or in the default location.
pub fn get_config_path(config_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = config_dir {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }

    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the configuration, writing a default file first if none exists yet.
pub fn load(config_dir: Option<&Path>) -> Result<Config> {
    let config_path = get_config_path(config_dir)?;

    if !config_path.exists() {
        create_default_config(&config_path)
            .context("Failed to create default config during load")?;
    }

    load_from_path(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

/// Read and validate a config file. Does not create anything.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    validate_config(&config)?;
    Ok(config)
}

/// Write a commented config file holding the defaults.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = ConfigBuilder::new()
        .add_section("Preset store")
        .add_setting(
            "store_url",
            &format!("\"{DEFAULT_STORE_URL}\""),
            "Base URL of the preset store",
        )
        .add_setting(
            "request_timeout",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            &format!(
                "Seconds before a store call fails ({MINIMUM_REQUEST_TIMEOUT_SECS}-{MAXIMUM_REQUEST_TIMEOUT_SECS})"
            ),
        )
        .add_section("Panel")
        .add_setting(
            "default_power",
            &DEFAULT_POWER.to_string(),
            &format!("Power after startup and cancel ({MINIMUM_POWER}-{MAXIMUM_POWER})"),
        )
        .add_setting(
            "delete_grace_period",
            &DEFAULT_DELETE_GRACE_SECS.to_string(),
            &format!(
                "Seconds to hold before a delete fires ({MINIMUM_DELETE_GRACE_SECS}-{MAXIMUM_DELETE_GRACE_SECS})"
            ),
        )
        .build();

    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", path.display());
    Ok(())
}

/// Builds a TOML file with section headers and aligned trailing comments.
struct ConfigBuilder {
    entries: Vec<Entry>,
}

enum Entry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(Entry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(Entry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Setting { line, .. } => Some(line.len()),
                Entry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                Entry::Section(header) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(header);
                }
                Entry::Setting { line, comment } => {
                    lines.push(format!("{line:<width$}{comment}"));
                }
            }
        }

        let mut content = lines.join("\n");
        content.push('\n');
        content
    }
}
