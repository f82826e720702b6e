//! Process signal handling.
//!
//! SIGINT, SIGTERM and SIGHUP end the interactive session. The handler thread
//! turns each of them into a [`SessionEvent::Shutdown`] on the session channel
//! so the main loop can restore the terminal before exiting.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::sync::mpsc::Sender;
use std::thread;

use crate::terminal::SessionEvent;

pub fn setup_signal_handler(tx: Sender<SessionEvent>, debug_enabled: bool) -> Result<()> {
    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    thread::Builder::new()
        .name("signals".into())
        .spawn(move || {
            for sig in signals.forever() {
                if debug_enabled {
                    log_pipe!();
                    log_debug!("Received signal {}", signal_name(sig));
                }
                if tx.send(SessionEvent::Shutdown).is_err() {
                    break;
                }
            }
        })
        .context("failed to spawn signal handler thread")?;

    Ok(())
}

fn signal_name(sig: i32) -> &'static str {
    match sig {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGHUP => "SIGHUP",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(signal_name(SIGINT), "SIGINT");
        assert_eq!(signal_name(SIGHUP), "SIGHUP");
        assert_eq!(signal_name(0), "unknown");
    }
}
