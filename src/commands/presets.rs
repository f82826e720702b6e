//! `micropanel presets`: print both preset lists and exit.

use anyhow::{Context, Result};

use crate::preset::Preset;
use crate::state::{CustomSlots, format_time};
use crate::store::PresetStore;

pub fn run_presets_command(store: &dyn PresetStore) -> Result<()> {
    let catalog = store
        .list_presets()
        .context("Failed to load presets from the store")?;

    log_block_start!("Built-in presets:");
    if catalog.builtins.is_empty() {
        log_indented!("(none)");
    }
    for (index, preset) in catalog.builtins.iter().enumerate() {
        log_indented!("F{:<3} {}", index + 1, describe_preset(preset));
    }

    log_block_start!("Custom slots:");
    for (index, slot) in CustomSlots::from_presets(catalog.customs).iter().enumerate() {
        if slot.is_blank() {
            log_indented!("{}    {}", index + 1, slot.preset.name);
        } else {
            log_indented!("{}    {}", index + 1, describe_preset(&slot.preset));
        }
    }

    Ok(())
}

/// `Popcorn  03:00 @ 7  '*'  Stir halfway`
pub fn describe_preset(preset: &Preset) -> String {
    let time = preset
        .time_seconds
        .map(format_time)
        .unwrap_or_else(|| "--:--".to_string());
    let power = preset
        .power
        .map(|p| p.to_string())
        .unwrap_or_else(|| "?".to_string());

    let mut line = format!("{}  {} @ {}  '{}'", preset.name, time, power, preset.pattern);
    if !preset.instruction.is_empty() {
        line.push_str("  ");
        line.push_str(&preset.instruction);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::preset::PresetOrigin;
    use crate::store::{MockPresetStore, PresetCatalog};

    fn popcorn() -> Preset {
        Preset {
            id: None,
            name: "Popcorn".to_string(),
            time_seconds: Some(180),
            power: Some(7),
            pattern: "*".to_string(),
            instruction: "Stir halfway".to_string(),
            food: Some("Popcorn".to_string()),
            origin: PresetOrigin::Builtin,
        }
    }

    #[test]
    fn test_describe_preset() {
        assert_eq!(
            describe_preset(&popcorn()),
            "Popcorn  03:00 @ 7  '*'  Stir halfway"
        );
    }

    #[test]
    fn test_describe_malformed_preset() {
        let preset = Preset {
            time_seconds: None,
            power: None,
            instruction: String::new(),
            ..popcorn()
        };
        assert_eq!(describe_preset(&preset), "Popcorn  --:-- @ ?  '*'");
    }

    #[test]
    fn test_lists_presets() {
        crate::logger::Log::set_enabled(false);
        let mut store = MockPresetStore::new();
        store.expect_list_presets().times(1).returning(|| {
            Ok(PresetCatalog {
                builtins: vec![popcorn()],
                customs: Vec::new(),
            })
        });
        assert!(run_presets_command(&store).is_ok());
    }

    #[test]
    fn test_store_failure_is_an_error() {
        crate::logger::Log::set_enabled(false);
        let mut store = MockPresetStore::new();
        store
            .expect_list_presets()
            .returning(|| Err(StoreError::Transport("connection refused".into())));
        let err = run_presets_command(&store).unwrap_err();
        assert!(err.to_string().contains("Failed to load presets"));
    }
}
