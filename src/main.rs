//! Main entry point: argument dispatch and process exit codes.
//!
//! - `micropanel` / `micropanel run`: interactive panel
//! - `micropanel presets`: print the stored presets
//! - `micropanel --help` / `--version`

use anyhow::{Context, Result};
use std::path::PathBuf;

use micropanel::args::{self, CliAction, CommonOptions, ParsedArgs};
use micropanel::commands::presets::run_presets_command;
use micropanel::config::{self, Config};
use micropanel::constants::*;
use micropanel::logger::{Log, LoggerGuard};
use micropanel::store::HttpPresetStore;
use micropanel::{Micropanel, log_block_start, log_end, log_error, log_pipe, log_version};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    let code = match parsed.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            EXIT_SUCCESS
        }
        CliAction::ShowHelp => {
            args::display_help();
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            EXIT_FAILURE
        }
        CliAction::Run { options, log_file } => report(run(options, log_file)),
        CliAction::ListPresets { options, log_file } => {
            report(list_presets(options, log_file))
        }
    };

    std::process::exit(code);
}

fn report(result: Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            log_pipe!();
            log_error!("{:#}", e);
            log_end!();
            EXIT_FAILURE
        }
    }
}

/// Load the config and apply command-line overrides.
fn load_config(options: &CommonOptions) -> Result<(Config, PathBuf)> {
    if options.debug_enabled {
        Log::set_timestamps(true);
    }

    let config_dir = options.config_dir.as_deref().map(PathBuf::from);
    let path = config::get_config_path(config_dir.as_deref())?;
    let mut config = Config::load(config_dir.as_deref())?;

    if let Some(url) = &options.store_url {
        config.store_url = Some(url.clone());
        config::validation::validate_config(&config).context("Invalid --store value")?;
    }

    Ok((config, path))
}

/// Copy output to `--log <file>` for as long as the guard lives.
fn start_log_file(log_file: Option<String>) -> Result<Option<LoggerGuard>> {
    log_file.map(Log::start_file_logging).transpose()
}

fn run(options: CommonOptions, log_file: Option<String>) -> Result<()> {
    let _log_guard = start_log_file(log_file)?;

    let (config, path) = load_config(&options)?;
    Micropanel::new(config)
        .config_path(path)
        .debug(options.debug_enabled)
        .run()
}

fn list_presets(options: CommonOptions, log_file: Option<String>) -> Result<()> {
    let _log_guard = start_log_file(log_file)?;
    let (config, _) = load_config(&options)?;

    log_version!();
    let store = HttpPresetStore::new(config.store_url(), config.request_timeout())?;
    log_block_start!("Preset store: {}", store.base_url());
    run_presets_command(&store)?;
    log_end!();
    Ok(())
}
