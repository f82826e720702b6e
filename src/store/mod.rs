//! Preset store boundary.
//!
//! The store keeps the built-in presets and the user's custom presets. The panel
//! never calls it directly: requests go through a [`StoreGateway`] and results come
//! back later as [`StoreReply`] values, so a slow store never blocks input.
//!
//! - [`http`]: the HTTP client for the real store
//! - [`dispatch`]: request/reply types and the worker thread that runs them

pub mod dispatch;
pub mod http;

use serde_json::Value;

use crate::error::StoreError;
use crate::preset::{Preset, PresetDraft, PresetOrigin, field};

pub use dispatch::{RefreshReason, StoreGateway, StoreReply, StoreRequest, StoreWorker, execute};
pub use http::HttpPresetStore;

/// Both preset lists as returned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetCatalog {
    pub builtins: Vec<Preset>,
    pub customs: Vec<Preset>,
}

impl PresetCatalog {
    /// Normalize a list response body.
    ///
    /// Accepts `presets`/`builtins` for the built-in list and `customs`/`custom`
    /// for the custom list, in either casing.
    pub fn from_wire(body: &Value) -> Result<Self, StoreError> {
        let record = body
            .as_object()
            .ok_or_else(|| StoreError::Malformed("preset list is not a JSON object".into()))?;

        Ok(Self {
            builtins: Preset::list_from_wire(
                field(record, &["presets", "builtins"]),
                PresetOrigin::Builtin,
            ),
            customs: Preset::list_from_wire(
                field(record, &["customs", "custom"]),
                PresetOrigin::Custom,
            ),
        })
    }
}

/// Operations offered by the preset store.
///
/// Calls block; run them off the panel thread (see [`StoreWorker`]).
#[cfg_attr(test, mockall::automock)]
pub trait PresetStore: Send + Sync {
    fn list_presets(&self) -> Result<PresetCatalog, StoreError>;

    /// Persist a new custom preset and return it with the id the store assigned.
    fn create_custom(&self, draft: &PresetDraft) -> Result<Preset, StoreError>;

    fn delete_custom(&self, id: u32) -> Result<(), StoreError>;

    /// Whether no custom preset uses `pattern` yet.
    fn is_pattern_available(&self, pattern: &str) -> Result<bool, StoreError>;
}
