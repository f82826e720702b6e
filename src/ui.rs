//! The user-facing capabilities the panel needs: asking for a line of text and
//! showing a notice.

use crate::error::PanelError;

pub const NAME_PROMPT: &str = "Preset name";
pub const INSTRUCTION_PROMPT: &str = "Instruction (optional)";
pub const PATTERN_PROMPT: &str = "Display character";

/// Something the user should see.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Short-lived hint, e.g. a rejected keypad entry.
    Message(String),
    /// The countdown reached zero.
    TimesUp,
    PresetSaved(String),
    PresetDeleted(String),
    Error(PanelError),
}

pub trait PanelUi {
    /// Ask for a line of text. `None` means the user declined.
    fn prompt(&mut self, question: &str) -> Option<String>;

    fn notify(&mut self, notice: Notice);
}
