//! Error types for the panel and the preset store.
//!
//! Nothing here is fatal: every variant is reported to the user and the panel
//! stays usable.

use thiserror::Error;

/// Failure of a preset store call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store could not be reached or answered with a server failure.
    #[error("preset store unreachable: {0}")]
    Transport(String),

    /// The store understood the request and refused it.
    #[error("preset store rejected the request: {0}")]
    Rejected(String),

    /// The store answered with a body we could not interpret.
    #[error("unexpected response from preset store: {0}")]
    Malformed(String),
}

/// Failure of a panel operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// Local input check failed (empty prompt, bad pattern, nothing to save).
    #[error("{0}")]
    InvalidInput(String),

    /// Another custom preset already uses this pattern.
    #[error("pattern '{0}' is already used by another custom preset")]
    PatternInUse(String),

    /// A preset from the store has a non-numeric time or power.
    #[error("preset '{0}' has an unusable time or power value")]
    MalformedPreset(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PanelError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PanelError::InvalidInput(message.into())
    }
}
