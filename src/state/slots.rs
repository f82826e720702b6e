//! The fixed set of custom preset slots.

use crate::constants::CUSTOM_SLOT_CAPACITY;
use crate::preset::Preset;

/// One custom slot: a stored preset or the blank placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomSlot {
    pub preset: Preset,
    /// Positional id (slot index + 1) stamped when the slot is activated.
    pub local_id: Option<u32>,
}

impl CustomSlot {
    pub fn blank() -> Self {
        Self {
            preset: Preset::blank(),
            local_id: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.preset.is_blank()
    }
}

/// Custom slots as shown on the panel.
///
/// Always holds at least [`CUSTOM_SLOT_CAPACITY`] entries. A store that returns
/// more than that keeps all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomSlots {
    slots: Vec<CustomSlot>,
}

impl CustomSlots {
    pub fn from_presets(presets: Vec<Preset>) -> Self {
        let mut slots = Self {
            slots: presets
                .into_iter()
                .map(|preset| CustomSlot {
                    preset,
                    local_id: None,
                })
                .collect(),
        };
        slots.fill_empty();
        slots
    }

    /// Pad with blank slots up to capacity.
    pub fn fill_empty(&mut self) {
        while self.slots.len() < CUSTOM_SLOT_CAPACITY {
            self.slots.push(CustomSlot::blank());
        }
    }

    pub fn get(&self, index: usize) -> Option<&CustomSlot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomSlot> {
        self.slots.iter()
    }

    pub fn stamp_local_id(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.local_id = u32::try_from(index + 1).ok();
        }
    }

    /// Id to send when deleting the slot: the store's id when it gave one,
    /// otherwise the positional id.
    pub fn delete_target(&self, index: usize) -> Option<u32> {
        let slot = self.slots.get(index)?;
        if slot.is_blank() {
            return None;
        }
        slot.preset
            .id
            .or(slot.local_id)
            .or_else(|| u32::try_from(index + 1).ok())
    }

    /// Replace a slot with the blank placeholder, returning what it held.
    pub fn clear(&mut self, index: usize) -> Option<Preset> {
        let slot = self.slots.get_mut(index)?;
        let previous = std::mem::replace(slot, CustomSlot::blank());
        Some(previous.preset)
    }
}

impl Default for CustomSlots {
    fn default() -> Self {
        Self::from_presets(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PresetOrigin;

    fn custom(name: &str, id: Option<u32>) -> Preset {
        Preset {
            id,
            name: name.to_string(),
            time_seconds: Some(45),
            power: Some(8),
            pattern: name[..1].to_string(),
            instruction: String::new(),
            food: None,
            origin: PresetOrigin::Custom,
        }
    }

    #[test]
    fn test_pads_to_capacity_with_blanks() {
        let slots = CustomSlots::from_presets(vec![custom("Tea", Some(4))]);
        assert_eq!(slots.len(), CUSTOM_SLOT_CAPACITY);
        assert!(!slots.get(0).unwrap().is_blank());
        for slot in slots.iter().skip(1) {
            assert_eq!(slot.preset, Preset::blank());
        }
    }

    #[test]
    fn test_never_truncates() {
        let presets = (0..5).map(|i| custom(&format!("P{i}"), Some(i))).collect();
        let slots = CustomSlots::from_presets(presets);
        assert_eq!(slots.len(), 5);
    }

    #[test]
    fn test_delete_target_prefers_store_id() {
        let mut slots = CustomSlots::from_presets(vec![custom("Tea", Some(17)), custom("Soup", None)]);
        slots.stamp_local_id(0);
        assert_eq!(slots.get(0).unwrap().local_id, Some(1));
        assert_eq!(slots.delete_target(0), Some(17));
        assert_eq!(slots.delete_target(1), Some(2));
        assert_eq!(slots.delete_target(2), None);
        assert_eq!(slots.delete_target(9), None);
    }

    #[test]
    fn test_clear_leaves_blank() {
        let mut slots = CustomSlots::from_presets(vec![custom("Tea", Some(17))]);
        let removed = slots.clear(0).unwrap();
        assert_eq!(removed.name, "Tea");
        assert!(slots.get(0).unwrap().is_blank());
        assert_eq!(slots.len(), CUSTOM_SLOT_CAPACITY);
    }
}
