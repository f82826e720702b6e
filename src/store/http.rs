//! HTTP client for the remote preset store.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET    presets`                   both preset lists
//! - `POST   custom`                    create a custom preset
//! - `DELETE custom/{id}`               delete a custom preset
//! - `GET    custom/available/{pattern}` pattern availability

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use super::{PresetCatalog, PresetStore};
use crate::error::StoreError;
use crate::preset::{Preset, PresetDraft, PresetOrigin};

/// Blocking HTTP implementation of [`PresetStore`].
pub struct HttpPresetStore {
    client: Client,
    base_url: Url,
}

impl HttpPresetStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid store URL '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Store URL '{}' cannot be used as a base URL", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl PresetStore for HttpPresetStore {
    fn list_presets(&self) -> Result<PresetCatalog, StoreError> {
        let response = self
            .client
            .get(self.endpoint(&["presets"]))
            .send()
            .map_err(transport)?;
        let body: Value = check_status(response)?
            .json()
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        PresetCatalog::from_wire(&body)
    }

    fn create_custom(&self, draft: &PresetDraft) -> Result<Preset, StoreError> {
        let response = self
            .client
            .post(self.endpoint(&["custom"]))
            .json(draft)
            .send()
            .map_err(transport)?;
        let text = check_status(response)?.text().map_err(transport)?;

        // Some store versions answer 201 with an empty body.
        let created = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| Preset::from_wire(&body, PresetOrigin::Custom));
        Ok(created.unwrap_or_else(|| preset_from_draft(draft)))
    }

    fn delete_custom(&self, id: u32) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.endpoint(&["custom", &id.to_string()]))
            .send()
            .map_err(transport)?;
        check_status(response).map(|_| ())
    }

    fn is_pattern_available(&self, pattern: &str) -> Result<bool, StoreError> {
        let response = self
            .client
            .get(self.endpoint(&["custom", "available", pattern]))
            .send()
            .map_err(transport)?;
        let body: Value = check_status(response)?
            .json()
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        availability_from_wire(&body)
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

/// Split failures into rejections (the store refused the payload) and
/// everything else.
fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            Err(StoreError::Rejected(rejection_message(&body, status)))
        }
        _ => Err(StoreError::Transport(format!("store answered HTTP {status}"))),
    }
}

/// Pull a human readable message out of a rejection body.
///
/// Understands `{"message": ...}`, problem details with an `errors` map, and
/// plain text bodies.
pub(crate) fn rejection_message(body: &str, status: StatusCode) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let text = body.trim();
        return if text.is_empty() {
            format!("HTTP {status}")
        } else {
            text.to_string()
        };
    };

    if let Some(errors) = value
        .get("errors")
        .or_else(|| value.get("Errors"))
        .and_then(Value::as_object)
    {
        let details: Vec<String> = errors
            .iter()
            .flat_map(|(field, messages)| match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|message| format!("{field}: {message}"))
                    .collect(),
                Value::String(message) => vec![format!("{field}: {message}")],
                _ => Vec::new(),
            })
            .collect();
        if !details.is_empty() {
            return details.join("; ");
        }
    }

    ["message", "Message", "title", "Title"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Accept a bare boolean or `{"available": bool}`.
pub(crate) fn availability_from_wire(body: &Value) -> Result<bool, StoreError> {
    body.as_bool()
        .or_else(|| {
            body.get("available")
                .or_else(|| body.get("Available"))
                .and_then(Value::as_bool)
        })
        .ok_or_else(|| StoreError::Malformed(format!("expected availability flag, got {body}")))
}

fn preset_from_draft(draft: &PresetDraft) -> Preset {
    Preset {
        id: None,
        name: draft.name.clone(),
        time_seconds: Some(draft.time_seconds),
        power: Some(draft.power),
        pattern: draft.pattern.clone(),
        instruction: draft.instruction.clone(),
        food: draft.food.clone(),
        origin: PresetOrigin::Custom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(base: &str) -> HttpPresetStore {
        HttpPresetStore::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let store = store("http://localhost:5211/api/microwave");
        assert_eq!(
            store.endpoint(&["custom", "7"]).as_str(),
            "http://localhost:5211/api/microwave/custom/7"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let store = store("http://localhost:5211/api/microwave/");
        assert_eq!(
            store.endpoint(&["presets"]).as_str(),
            "http://localhost:5211/api/microwave/presets"
        );
    }

    #[test]
    fn test_endpoint_encodes_pattern() {
        let store = store("http://localhost:5211/api/microwave");
        let url = store.endpoint(&["custom", "available", "#"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:5211/api/microwave/custom/available/%23"
        );
        let url = store.endpoint(&["custom", "available", "/"]);
        assert!(url.as_str().ends_with("/available/%2F"));
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(HttpPresetStore::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpPresetStore::new("mailto:me@example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_rejection_message_problem_details() {
        let body = r#"{"title":"One or more validation errors occurred.","errors":{"Strings":["Pattern must be one character"]}}"#;
        assert_eq!(
            rejection_message(body, StatusCode::BAD_REQUEST),
            "Strings: Pattern must be one character"
        );
    }

    #[test]
    fn test_rejection_message_fallbacks() {
        assert_eq!(
            rejection_message(r#"{"message":"duplicate"}"#, StatusCode::CONFLICT),
            "duplicate"
        );
        assert_eq!(
            rejection_message("name too long", StatusCode::BAD_REQUEST),
            "name too long"
        );
        assert_eq!(
            rejection_message("", StatusCode::UNPROCESSABLE_ENTITY),
            "HTTP 422 Unprocessable Entity"
        );
    }

    #[test]
    fn test_availability_from_wire() {
        assert!(availability_from_wire(&json!(true)).unwrap());
        assert!(!availability_from_wire(&json!({ "available": false })).unwrap());
        assert!(availability_from_wire(&json!({ "Available": true })).unwrap());
        assert!(availability_from_wire(&json!("yes")).is_err());
    }

    #[test]
    fn test_unreachable_store_is_transport_error() {
        // Port 9 (discard) is closed on test machines; the connect fails fast.
        let store = store("http://127.0.0.1:9/api/microwave");
        assert!(matches!(
            store.list_presets(),
            Err(StoreError::Transport(_))
        ));
    }
}
