//! Custom preset lifecycle.
//!
//! Creation is a chain of store calls: pattern check, create, then a full list
//! refresh so slot order and ids come from the store. Deletion waits out a grace
//! period, blanks the slot locally, and only then tells the store. A failed
//! delete is reported but the slot stays blank until the next refresh.

use super::Panel;
use super::timer::Timer;
use crate::error::PanelError;
use crate::preset::PresetDraft;
use crate::state::CustomSlots;
use crate::store::{RefreshReason, StoreGateway, StoreReply, StoreRequest};
use crate::ui::{INSTRUCTION_PROMPT, NAME_PROMPT, Notice, PATTERN_PROMPT, PanelUi};

/// A delete waiting for its grace period to pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingDelete {
    pub index: usize,
    pub id: u32,
    pub name: String,
    pub timer: Timer,
}

impl Panel {
    /// Press on a custom slot: apply it, or save the current settings into it
    /// when it is blank.
    pub fn activate_or_create(
        &mut self,
        index: usize,
        ui: &mut dyn PanelUi,
        store: &mut dyn StoreGateway,
    ) {
        if self.state.running {
            return;
        }
        let Some(slot) = self.customs.get(index) else {
            return;
        };

        if !slot.is_blank() {
            let preset = slot.preset.clone();
            self.select_preset(&preset);
            self.customs.stamp_local_id(index);
            return;
        }

        match self.collect_draft(ui) {
            Ok(draft) => {
                self.trace(&format!(
                    "Checking pattern '{}' for new preset '{}'",
                    draft.pattern, draft.name
                ));
                store.submit(StoreRequest::CheckPattern { draft });
            }
            Err(e) => ui.notify(Notice::Error(e)),
        }
    }

    /// Build a new preset from the current settings and the user's answers.
    fn collect_draft(&self, ui: &mut dyn PanelUi) -> Result<PresetDraft, PanelError> {
        if self.state.time_seconds == 0 || self.state.power == 0 {
            return Err(PanelError::invalid(
                "Set a cook time and power before saving a preset",
            ));
        }

        let name = ui
            .prompt(NAME_PROMPT)
            .map(|answer| answer.trim().to_string())
            .filter(|answer| !answer.is_empty())
            .ok_or_else(|| PanelError::invalid("Preset name cannot be empty"))?;

        let instruction = ui
            .prompt(INSTRUCTION_PROMPT)
            .map(|answer| answer.trim().to_string())
            .ok_or_else(|| PanelError::invalid("Preset creation cancelled"))?;

        let pattern = ui
            .prompt(PATTERN_PROMPT)
            .ok_or_else(|| PanelError::invalid("Preset creation cancelled"))?;
        let mut chars = pattern.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => {}
            _ => {
                return Err(PanelError::invalid(
                    "Display pattern must be exactly one character",
                ));
            }
        }

        Ok(PresetDraft {
            name,
            time_seconds: self.state.time_seconds,
            power: self.state.power,
            pattern,
            instruction,
            food: None,
        })
    }

    /// Press-and-hold on a custom slot starts the delete grace period.
    pub fn begin_delete(&mut self, index: usize) {
        if self.state.running {
            return;
        }
        let Some(id) = self.customs.delete_target(index) else {
            return;
        };
        let name = self
            .customs
            .get(index)
            .map(|slot| slot.preset.name.clone())
            .unwrap_or_default();

        self.trace(&format!("Deleting '{name}' unless released"));
        self.pending_delete = Some(PendingDelete {
            index,
            id,
            name,
            timer: Timer::once(self.clock.now(), self.settings.delete_grace),
        });
    }

    /// Releasing before the grace period ends abandons the delete.
    pub fn cancel_delete(&mut self) {
        if self.pending_delete.take().is_some() {
            self.trace("Delete abandoned");
        }
    }

    pub fn has_pending_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub(crate) fn fire_pending_delete(&mut self, store: &mut dyn StoreGateway) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };

        // A refresh may have moved things around during the grace period.
        let unchanged = self.customs.delete_target(pending.index) == Some(pending.id)
            && self
                .customs
                .get(pending.index)
                .is_some_and(|slot| slot.preset.name == pending.name);
        if !unchanged {
            self.trace(&format!(
                "Slot {} changed before delete fired; skipping",
                pending.index + 1
            ));
            return;
        }

        self.customs.clear(pending.index);
        store.submit(StoreRequest::Delete {
            slot: pending.index,
            id: pending.id,
            name: pending.name,
        });
    }

    /// Finish whatever operation a store reply belongs to.
    pub fn handle_reply(
        &mut self,
        reply: StoreReply,
        ui: &mut dyn PanelUi,
        store: &mut dyn StoreGateway,
    ) {
        match reply {
            StoreReply::Listed { reason, result } => match result {
                Ok(catalog) => {
                    self.trace(&format!(
                        "Loaded {} built-in and {} custom presets ({reason:?})",
                        catalog.builtins.len(),
                        catalog.customs.len()
                    ));
                    self.builtins = catalog.builtins;
                    self.customs = CustomSlots::from_presets(catalog.customs);
                }
                Err(e) => self.report(ui, e.into()),
            },

            StoreReply::PatternChecked { draft, result } => match result {
                Ok(true) => store.submit(StoreRequest::Create { draft }),
                Ok(false) => ui.notify(Notice::Error(PanelError::PatternInUse(draft.pattern))),
                Err(e) => self.report(ui, e.into()),
            },

            StoreReply::Created { draft, result } => match result {
                Ok(created) => {
                    log_block_start!("Saved custom preset '{}'", created.name);
                    ui.notify(Notice::PresetSaved(draft.name));
                    self.refresh(RefreshReason::AfterCreate, store);
                }
                Err(e) => self.report(ui, e.into()),
            },

            StoreReply::Deleted {
                slot,
                id,
                name,
                result,
            } => match result {
                Ok(()) => {
                    log_block_start!("Deleted custom preset '{}' (id {})", name, id);
                    ui.notify(Notice::PresetDeleted(name));
                }
                Err(e) => {
                    log_pipe!();
                    log_warning!(
                        "Slot {} shows blank but '{}' may still be stored",
                        slot + 1,
                        name
                    );
                    self.report(ui, e.into());
                }
            },
        }
    }
}
