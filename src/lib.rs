//! # Micropanel Library
//!
//! Internal library for the micropanel binary.
//!
//! This library exists to enable testing of the panel internals and to keep CLI
//! dispatch (main.rs) apart from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Micropanel` acquires resources and runs the interactive session
//! - **Core Logic**: `core::Panel` owns the panel state, the countdown, and the
//!   custom preset lifecycle
//! - **State**: `state` holds the keypad/countdown state and the custom slots
//! - **Store**: `store` talks to the remote preset store from a worker thread
//! - **Terminal**: `terminal` maps keys to panel commands and renders status lines
//! - **Configuration**: `config` for TOML-based settings
//! - **Infrastructure**: signal handling, logging, and the clock abstraction

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod preset;
pub mod signals;
pub mod state;
pub mod store;
pub mod terminal;
pub mod time_source;
pub mod ui;

#[cfg(any(test, feature = "testing-support"))]
pub mod testing;

mod micropanel;

pub use crate::core::{Panel, PanelSettings};
pub use micropanel::Micropanel;
