//! Application coordinator for the interactive panel.
//!
//! Acquires everything the session needs (store client, store worker, signal
//! thread, raw terminal, key reader), runs the event loop, and releases the
//! terminal again on the way out.
//!
//! - Normal startup: `Micropanel::new(config).run()`
//! - Debug session: `Micropanel::new(config).debug(true).run()`

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::channel;

use crate::config::Config;
use crate::core::{Panel, PanelSettings};
use crate::signals::setup_signal_handler;
use crate::store::{HttpPresetStore, RefreshReason, StoreGateway, StoreWorker};
use crate::terminal::{
    PanelCommand, SessionEvent, TerminalGuard, TerminalUi, map_key, spawn_key_reader, status,
};
use crate::time_source::{Clock, SystemClock};
use crate::ui::PanelUi;

/// Builder for the interactive session.
pub struct Micropanel {
    config: Config,
    config_path: Option<PathBuf>,
    debug_enabled: bool,
}

impl Micropanel {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
            debug_enabled: false,
        }
    }

    pub fn debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }

    /// Shown in the startup summary.
    pub fn config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn run(self) -> Result<()> {
        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled - logging every panel transition");
        }
        self.config.log_config(self.config_path.as_deref());

        let store = HttpPresetStore::new(self.config.store_url(), self.config.request_timeout())
            .context("failed to set up the preset store client")?;

        let (tx, rx) = channel::<SessionEvent>();

        let reply_tx = tx.clone();
        let mut worker = StoreWorker::spawn(Arc::new(store), move |reply| {
            let _ = reply_tx.send(SessionEvent::Store(reply));
        })?;

        setup_signal_handler(tx.clone(), self.debug_enabled)?;

        let mut panel = Panel::new(PanelSettings::from(&self.config), Arc::new(SystemClock))
            .with_debug(self.debug_enabled);
        let mut ui = TerminalUi::new(rx);

        log_block_start!("Digits set the time, space starts, Esc quits");
        log_indented!("Run `micropanel --help` for all keys");

        let term = TerminalGuard::new().context("failed to initialize terminal")?;
        spawn_key_reader(tx)?;

        panel.refresh(RefreshReason::Startup, &mut worker);
        let result = run_loop(&mut panel, &mut ui, &mut worker);

        drop(term);
        log_block_start!("Panel closed");
        log_end!();
        result
    }
}

/// Drive the panel until the user quits or a shutdown signal arrives.
fn run_loop(panel: &mut Panel, ui: &mut TerminalUi, worker: &mut StoreWorker) -> Result<()> {
    let clock = SystemClock;
    let mut last_status = String::new();
    let mut last_slots = String::new();

    loop {
        render(panel, &mut last_status, &mut last_slots);

        let timeout = panel
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(clock.now()));

        match ui.next_event(timeout)? {
            Some(SessionEvent::Key(key)) => {
                if let Some(command) = map_key(key) {
                    if command == PanelCommand::Quit {
                        break;
                    }
                    apply_command(panel, command, ui, worker);
                }
            }
            Some(SessionEvent::Store(reply)) => panel.handle_reply(reply, ui, worker),
            Some(SessionEvent::Shutdown) => break,
            None => {}
        }

        if ui.shutdown_requested() {
            break;
        }
        panel.poll_timers(ui, worker);
    }

    Ok(())
}

pub(crate) fn apply_command(
    panel: &mut Panel,
    command: PanelCommand,
    ui: &mut dyn PanelUi,
    store: &mut dyn StoreGateway,
) {
    match command {
        PanelCommand::Digit(digit) => panel.digit(digit, ui),
        PanelCommand::ToggleSetting => panel.toggle_setting(),
        PanelCommand::StartOrPause => panel.start_or_pause(),
        PanelCommand::StartOrAddThirty => panel.start_or_add_thirty(ui),
        PanelCommand::AddThirty => panel.add_thirty(ui),
        PanelCommand::PauseOrCancel => panel.pause_or_cancel(),
        PanelCommand::Cancel => panel.cancel(),
        PanelCommand::Builtin(index) => panel.select_builtin(index),
        PanelCommand::Custom(index) => panel.activate_or_create(index, ui, store),
        PanelCommand::BeginDelete(index) => panel.begin_delete(index),
        PanelCommand::CancelDelete => panel.cancel_delete(),
        PanelCommand::Refresh => panel.refresh(RefreshReason::Manual, store),
        PanelCommand::Quit => {}
    }
}

fn render(panel: &Panel, last_status: &mut String, last_slots: &mut String) {
    let slots = status::slots_line(panel);
    if slots != *last_slots {
        log_block_start!("Slots: {}", slots);
        *last_slots = slots;
    }

    let line = status::status_line(panel);
    if line != *last_status {
        log_decorated!("{}", line);
        if !panel.state().instruction.is_empty() {
            log_indented!("{}", panel.state().instruction);
        }
        *last_status = line;
    }
}
