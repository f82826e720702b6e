//! One-line rendering of the panel for the interactive session.

use crate::core::Panel;
use crate::ui::Notice;

/// The status line shown after every change, e.g.
/// `01:30 │ P7 │ running │ Popcorn │ ******* *******`.
pub fn status_line(panel: &Panel) -> String {
    let state = panel.state();

    let power = if state.setting_power {
        format!("[P{}]", state.power)
    } else {
        format!("P{}", state.power)
    };

    let mut parts = vec![panel.formatted_time(), power, panel.mode().as_str().to_string()];

    if let Some(preset) = &state.selected_preset {
        parts.push(preset.name.clone());
    }
    if panel.has_pending_delete() {
        parts.push("deleting…".to_string());
    }
    if !state.output_buffer.is_empty() {
        parts.push(state.output_buffer.trim_end().to_string());
    }

    parts.join(" │ ")
}

/// The custom slot row, blank slots included.
pub fn slots_line(panel: &Panel) -> String {
    panel
        .customs()
        .iter()
        .enumerate()
        .map(|(index, slot)| format!("{}:{}", index + 1, slot.preset.name))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::Message(text) => text.clone(),
        Notice::TimesUp => "Time's up!".to_string(),
        Notice::PresetSaved(name) => format!("Saved '{name}'"),
        Notice::PresetDeleted(name) => format!("Deleted '{name}'"),
        Notice::Error(error) => error.to_string(),
    }
}
