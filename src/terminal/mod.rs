//! Interactive terminal front end.
//!
//! Everything the session reacts to arrives as a [`SessionEvent`] on one mpsc
//! channel: key presses from the reader thread, store replies from the store
//! worker, and shutdown requests from the signal thread. [`TerminalUi`] reads
//! that channel, including while it is waiting for a prompt answer; anything
//! that is not a key press is parked in a backlog and handed out afterwards.

pub mod keymap;
pub mod status;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::logger::Log;
use crate::store::StoreReply;
use crate::ui::{Notice, PanelUi};

pub use keymap::{PanelCommand, map_key};

#[derive(Debug)]
pub enum SessionEvent {
    Key(KeyEvent),
    Store(StoreReply),
    Shutdown,
}

/// Puts the terminal in raw mode for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw terminal mode")?;
        Log::set_raw_mode(true);
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        Log::set_raw_mode(false);
        let _ = disable_raw_mode();
    }
}

/// Forward terminal key presses into the session channel.
///
/// The thread stops when the channel is closed or the terminal read fails.
pub fn spawn_key_reader(tx: Sender<SessionEvent>) -> Result<()> {
    thread::Builder::new()
        .name("key-reader".into())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(SessionEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log_pipe!();
                        log_error!("Failed to read from terminal: {}", e);
                        let _ = tx.send(SessionEvent::Shutdown);
                        break;
                    }
                }
            }
        })
        .context("failed to spawn key reader thread")?;
    Ok(())
}

pub struct TerminalUi {
    events: Receiver<SessionEvent>,
    backlog: VecDeque<SessionEvent>,
    shutdown_requested: bool,
}

impl TerminalUi {
    pub fn new(events: Receiver<SessionEvent>) -> Self {
        Self {
            events,
            backlog: VecDeque::new(),
            shutdown_requested: false,
        }
    }

    /// Set once Ctrl+C was pressed at a prompt or a shutdown arrived meanwhile.
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Next event, waiting at most `timeout` (forever when `None`).
    ///
    /// `Ok(None)` means the wait timed out.
    pub fn next_event(&mut self, timeout: Option<Duration>) -> Result<Option<SessionEvent>> {
        if let Some(event) = self.backlog.pop_front() {
            return Ok(Some(event));
        }

        match timeout {
            Some(timeout) => match self.events.recv_timeout(timeout) {
                Ok(event) => Ok(Some(event)),
                Err(RecvTimeoutError::Timeout) => Ok(None),
                Err(RecvTimeoutError::Disconnected) => {
                    anyhow::bail!("all event sources have stopped")
                }
            },
            None => self
                .events
                .recv()
                .map(Some)
                .context("all event sources have stopped"),
        }
    }

    fn echo(text: &str) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

impl PanelUi for TerminalUi {
    fn prompt(&mut self, question: &str) -> Option<String> {
        Self::echo(&format!("┃\r\n┣ {question}: "));

        let mut answer = String::new();
        let result = loop {
            let event = match self.events.recv() {
                Ok(event) => event,
                Err(_) => break None,
            };

            let key = match event {
                SessionEvent::Key(key) => key,
                SessionEvent::Shutdown => {
                    self.shutdown_requested = true;
                    break None;
                }
                other => {
                    self.backlog.push_back(other);
                    continue;
                }
            };

            if key.modifiers.contains(KeyModifiers::CONTROL) {
                if key.code == KeyCode::Char('c') {
                    self.shutdown_requested = true;
                    break None;
                }
                continue;
            }

            match key.code {
                KeyCode::Enter => break Some(answer),
                KeyCode::Esc => break None,
                KeyCode::Backspace => {
                    if answer.pop().is_some() {
                        Self::echo("\x08 \x08");
                    }
                }
                KeyCode::Char(c) => {
                    answer.push(c);
                    Self::echo(c.encode_utf8(&mut [0; 4]));
                }
                _ => {}
            }
        };

        Self::echo("\r\n");
        result
    }

    fn notify(&mut self, notice: Notice) {
        let text = status::notice_text(&notice);
        match notice {
            Notice::Error(_) => {
                log_pipe!();
                log_error!("{}", text);
            }
            Notice::TimesUp => {
                log_block_start!("\x1b[1m{}\x1b[0m", text);
            }
            _ => {
                log_block_start!("{}", text);
            }
        }
    }
}
