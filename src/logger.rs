//! Structured logging with box-drawing output.
//!
//! All panel output goes through the macros below so that it shares one visual
//! style, can be silenced during tests, and can be copied to a file with
//! `--log`. The interactive panel keeps the terminal in raw mode, so the logger
//! switches to `\r\n` line endings while raw mode is active.
//!
//! ## Logging Conventions
//!
//! - **`log_block_start!`**: opens a new conceptual block (`┃` spacer, then `┣ message`).
//! - **`log_decorated!`**: a line inside the current block (`┣ message`).
//! - **`log_indented!`**: nested detail (`┃   message`).
//! - **`log_pipe!`**: a bare `┃` spacer, used before a semantic level message.
//! - **`log_version!`** / **`log_end!`**: header and terminator, printed once each.
//! - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`**: `[LEVEL]` tagged lines.

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static TIMESTAMPS_ENABLED: AtomicBool = AtomicBool::new(false);
static RAW_MODE: AtomicBool = AtomicBool::new(false);

// Channel for copying output to a file when --log is active
static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Process-wide logging switches.
pub struct Log;

impl Log {
    /// Enable or disable logging, e.g. to keep test output quiet.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Prefix every line with the wall-clock time (used with `--debug`).
    pub fn set_timestamps(enabled: bool) {
        TIMESTAMPS_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Tell the logger whether the terminal is in raw mode.
    pub fn set_raw_mode(raw: bool) {
        RAW_MODE.store(raw, Ordering::SeqCst);
    }

    /// Copy all further output to `file_path` until the guard is dropped.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => {
                        file.write_all(text.as_bytes())?;
                    }
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// `[HH:MM:SS] ` when timestamps are enabled, empty otherwise.
    pub fn get_timestamp_prefix() -> String {
        if TIMESTAMPS_ENABLED.load(Ordering::SeqCst) {
            format!("[{}] ", chrono::Local::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Flushes and joins the file writer thread on drop.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Write one or more already formatted lines. Needed by the macros.
pub fn write_output(lines: &[String]) {
    let prefix = Log::get_timestamp_prefix();
    let newline = if RAW_MODE.load(Ordering::SeqCst) {
        "\r\n"
    } else {
        "\n"
    };
    let text: String = lines
        .iter()
        .map(|line| format!("{prefix}{line}{newline}"))
        .collect();

    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(&text)));
    }
    print!("{text}");
    let _ = std::io::stdout().flush();
}

// # Logging Macros

#[doc(hidden)]
#[macro_export]
macro_rules! __log_lines {
    ($($line:expr),+ $(,)?) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output(&[$(::std::string::String::from($line)),+]);
        }
    }};
}

/// Log a line inside the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => {
        $crate::__log_lines!(format!("┣ {}", format_args!($($arg)+)))
    };
}

/// Log an indented detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => {
        $crate::__log_lines!(format!("┃   {}", format_args!($($arg)+)))
    };
}

/// Log a bare pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::__log_lines!("┃")
    };
}

/// Open a new block of related lines.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => {
        $crate::__log_lines!("┃", format!("┣ {}", format_args!($($arg)+)))
    };
}

/// Log the application header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::__log_lines!(format!(
            "┏ micropanel v{} ━━╸",
            env!("CARGO_PKG_VERSION")
        ))
    };
}

/// Log the final terminator.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::__log_lines!("╹")
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::__log_lines!(format!(
            "┣[\x1b[33mWARNING\x1b[0m] {}",
            format_args!($($arg)+)
        ))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__log_lines!(format!(
            "┣[\x1b[31mERROR\x1b[0m] {}",
            format_args!($($arg)+)
        ))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__log_lines!(format!(
            "┣[\x1b[32mINFO\x1b[0m] {}",
            format_args!($($arg)+)
        ))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::__log_lines!(format!(
            "┣[\x1b[32mDEBUG\x1b[0m] {}",
            format_args!($($arg)+)
        ))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_codes() {
        assert_eq!(
            strip_ansi_codes("┣[\x1b[31mERROR\x1b[0m] boom"),
            "┣[ERROR] boom"
        );
        assert_eq!(strip_ansi_codes("plain"), "plain");
        assert_eq!(strip_ansi_codes("\x1bno bracket"), "\x1bno bracket");
    }

    #[test]
    fn test_timestamp_prefix_disabled_by_default() {
        assert!(Log::get_timestamp_prefix().is_empty());
    }
}
