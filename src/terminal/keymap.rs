//! Keyboard bindings for the interactive panel.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A panel action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Digit(u8),
    ToggleSetting,
    StartOrPause,
    StartOrAddThirty,
    AddThirty,
    PauseOrCancel,
    Cancel,
    /// Built-in preset by position (F1 is 0).
    Builtin(usize),
    /// Press on a custom slot.
    Custom(usize),
    /// Start holding a custom slot for deletion.
    BeginDelete(usize),
    /// Let go of a held slot.
    CancelDelete,
    Refresh,
    Quit,
}

const CUSTOM_KEYS: [char; 3] = ['q', 'w', 'e'];

pub fn map_key(key: KeyEvent) -> Option<PanelCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(PanelCommand::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            c.to_digit(10).map(|d| PanelCommand::Digit(d as u8))
        }
        KeyCode::Char('p') => Some(PanelCommand::ToggleSetting),
        KeyCode::Char(' ') => Some(PanelCommand::StartOrPause),
        KeyCode::Enter => Some(PanelCommand::StartOrAddThirty),
        KeyCode::Char('+') => Some(PanelCommand::AddThirty),
        KeyCode::Backspace => Some(PanelCommand::PauseOrCancel),
        KeyCode::Char('c') => Some(PanelCommand::Cancel),
        KeyCode::Char('x') => Some(PanelCommand::CancelDelete),
        KeyCode::Char('r') => Some(PanelCommand::Refresh),
        KeyCode::Esc => Some(PanelCommand::Quit),
        KeyCode::F(n) if (1..=12).contains(&n) => Some(PanelCommand::Builtin(usize::from(n - 1))),
        KeyCode::Char(c) => {
            if let Some(slot) = CUSTOM_KEYS.iter().position(|k| *k == c) {
                Some(PanelCommand::Custom(slot))
            } else {
                CUSTOM_KEYS
                    .iter()
                    .position(|k| k.to_ascii_uppercase() == c)
                    .map(PanelCommand::BeginDelete)
            }
        }
        _ => None,
    }
}

/// Lines describing the bindings, for help output.
pub fn key_help() -> &'static [&'static str] {
    &[
        "0-9        Keypad (time, or power after 'p')",
        "p          Toggle between time and power entry",
        "space      Start / pause",
        "enter      Start, or +30s while running",
        "+          Add 30 seconds",
        "backspace  Pause, or cancel when stopped",
        "c          Cancel",
        "F1-F12     Built-in presets",
        "q w e      Use custom slot 1-3 (saves current settings into a blank slot)",
        "Q W E      Hold to delete custom slot 1-3",
        "x          Release a held delete",
        "r          Reload presets from the store",
        "esc        Quit",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_and_controls() {
        assert_eq!(map_key(press(KeyCode::Char('7'))), Some(PanelCommand::Digit(7)));
        assert_eq!(map_key(press(KeyCode::Char('0'))), Some(PanelCommand::Digit(0)));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(PanelCommand::StartOrPause));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(PanelCommand::StartOrAddThirty));
        assert_eq!(map_key(press(KeyCode::Backspace)), Some(PanelCommand::PauseOrCancel));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(PanelCommand::Quit));
    }

    #[test]
    fn test_slots_and_presets() {
        assert_eq!(map_key(press(KeyCode::F(1))), Some(PanelCommand::Builtin(0)));
        assert_eq!(map_key(press(KeyCode::F(12))), Some(PanelCommand::Builtin(11)));
        assert_eq!(map_key(press(KeyCode::Char('w'))), Some(PanelCommand::Custom(1)));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('E'), KeyModifiers::SHIFT)),
            Some(PanelCommand::BeginDelete(2))
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), Some(PanelCommand::CancelDelete));
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_c_quits_but_c_cancels() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(PanelCommand::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('c'))), Some(PanelCommand::Cancel));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char('1'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
