//! One-shot command handlers.
//!
//! The interactive session itself lives in [`crate::Micropanel`].

pub mod presets;
