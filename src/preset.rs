//! Preset record and its normalization from store wire data.
//!
//! The store may spell every attribute in camelCase or PascalCase, and older
//! deployments still use the original field names (`nome`, `time`, `strings`,
//! `instrucao`). Records are read as loose JSON and normalized once here, so the
//! rest of the crate only ever sees [`Preset`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::BLANK_SLOT_NAME;
use crate::error::PanelError;

/// Where a preset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetOrigin {
    /// Shipped with the store; cannot be extended with +30.
    Builtin,
    /// Created by the user and stored in a custom slot.
    Custom,
}

/// A named cook configuration.
///
/// `time_seconds` and `power` are `None` when the store sent something that is
/// not a usable number. Such a preset can still be listed but selecting it takes
/// the degraded path (see [`Preset::cook_settings`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub id: Option<u32>,
    pub name: String,
    pub time_seconds: Option<u32>,
    pub power: Option<u8>,
    pub pattern: String,
    pub instruction: String,
    pub food: Option<String>,
    pub origin: PresetOrigin,
}

impl Preset {
    /// The placeholder shown in an empty custom slot.
    pub fn blank() -> Self {
        Self {
            id: None,
            name: BLANK_SLOT_NAME.to_string(),
            time_seconds: Some(0),
            power: Some(0),
            pattern: String::new(),
            instruction: String::new(),
            food: None,
            origin: PresetOrigin::Custom,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() || self.name == BLANK_SLOT_NAME
    }

    pub fn is_builtin(&self) -> bool {
        self.origin == PresetOrigin::Builtin
    }

    /// Time and power, or an error if either came over the wire malformed.
    pub fn cook_settings(&self) -> Result<(u32, u8), PanelError> {
        match (self.time_seconds, self.power) {
            (Some(time), Some(power)) => Ok((time, power)),
            _ => Err(PanelError::MalformedPreset(self.name.clone())),
        }
    }

    /// Normalize one wire record.
    pub fn from_wire(value: &Value, origin: PresetOrigin) -> Option<Self> {
        let record = value.as_object()?;

        let name = text_field(record, &["name", "nome"]).unwrap_or_default();
        let id = field(record, &["id"])
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok());
        let time_seconds = field(record, &["timeSeconds", "time"])
            .and_then(Value::as_u64)
            .and_then(|time| u32::try_from(time).ok());
        let power = field(record, &["power"])
            .and_then(Value::as_u64)
            .map(|power| u8::try_from(power).unwrap_or(u8::MAX));

        Some(Self {
            id,
            name,
            time_seconds,
            power,
            pattern: text_field(record, &["pattern", "strings"]).unwrap_or_default(),
            instruction: text_field(record, &["instruction", "instrucao"]).unwrap_or_default(),
            food: text_field(record, &["food"]).filter(|food| !food.is_empty()),
            origin,
        })
    }

    /// Normalize a wire array, skipping entries that are not JSON objects.
    pub fn list_from_wire(value: Option<&Value>, origin: PresetOrigin) -> Vec<Self> {
        value
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| Self::from_wire(item, origin))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Payload for creating a custom preset. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDraft {
    pub name: String,
    pub time_seconds: u32,
    pub power: u8,
    pub pattern: String,
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<String>,
}

/// Look up a field by any of `names`, in camelCase or PascalCase.
pub(crate) fn field<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| {
        record
            .get(*name)
            .or_else(|| record.get(&pascal_case(name)))
            .filter(|value| !value.is_null())
    })
}

fn text_field(record: &Map<String, Value>, names: &[&str]) -> Option<String> {
    field(record, names).and_then(Value::as_str).map(str::to_string)
}

fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
