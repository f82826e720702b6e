//! Store requests, their replies, and the worker that runs them.
//!
//! Every request produces exactly one reply. Replies carry whatever context the
//! panel needs to finish the operation, so the panel keeps no bookkeeping for
//! in-flight calls.

use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};
use std::thread;

use super::{PresetCatalog, PresetStore};
use crate::error::StoreError;
use crate::preset::{Preset, PresetDraft};

/// Why a preset list refresh was requested. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Startup,
    Manual,
    AfterCreate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    Refresh(RefreshReason),
    /// First half of custom preset creation.
    CheckPattern { draft: PresetDraft },
    Create { draft: PresetDraft },
    Delete { slot: usize, id: u32, name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreReply {
    Listed {
        reason: RefreshReason,
        result: Result<PresetCatalog, StoreError>,
    },
    PatternChecked {
        draft: PresetDraft,
        result: Result<bool, StoreError>,
    },
    Created {
        draft: PresetDraft,
        result: Result<Preset, StoreError>,
    },
    Deleted {
        slot: usize,
        id: u32,
        name: String,
        result: Result<(), StoreError>,
    },
}

/// Where the panel sends store requests.
pub trait StoreGateway {
    fn submit(&mut self, request: StoreRequest);
}

/// Collects requests without running them. Handy for driving the panel by hand.
impl StoreGateway for Vec<StoreRequest> {
    fn submit(&mut self, request: StoreRequest) {
        self.push(request);
    }
}

/// Run one request against `store` and wrap the outcome as a reply.
pub fn execute(store: &dyn PresetStore, request: StoreRequest) -> StoreReply {
    match request {
        StoreRequest::Refresh(reason) => StoreReply::Listed {
            reason,
            result: store.list_presets(),
        },
        StoreRequest::CheckPattern { draft } => {
            let result = store.is_pattern_available(&draft.pattern);
            StoreReply::PatternChecked { draft, result }
        }
        StoreRequest::Create { draft } => {
            let result = store.create_custom(&draft);
            StoreReply::Created { draft, result }
        }
        StoreRequest::Delete { slot, id, name } => StoreReply::Deleted {
            slot,
            id,
            name,
            result: store.delete_custom(id),
        },
    }
}

/// Background thread that runs store requests one at a time.
///
/// Replies are handed to the callback given at spawn time, which normally
/// forwards them into the panel's event channel. Dropping the worker closes its
/// queue; the thread exits once the request in flight (if any) completes.
pub struct StoreWorker {
    tx: Sender<StoreRequest>,
}

impl StoreWorker {
    pub fn spawn<F>(store: Arc<dyn PresetStore>, on_reply: F) -> anyhow::Result<Self>
    where
        F: Fn(StoreReply) + Send + 'static,
    {
        let (tx, rx) = channel::<StoreRequest>();

        thread::Builder::new()
            .name("preset-store".into())
            .spawn(move || {
                while let Ok(request) = rx.recv() {
                    on_reply(execute(store.as_ref(), request));
                }
            })?;

        Ok(Self { tx })
    }
}

impl StoreGateway for StoreWorker {
    fn submit(&mut self, request: StoreRequest) {
        if self.tx.send(request).is_err() {
            log_pipe!();
            log_error!("Preset store worker has stopped; request dropped");
        }
    }
}
