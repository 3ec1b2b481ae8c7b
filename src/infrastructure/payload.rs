// src/infrastructure/payload.rs
//
// Decoding of the server's JSON envelopes. Every reader is lenient about
// missing or mistyped collections: those decode to an empty list.
use crate::domain::{DomainError, ImageEntry, Note, Tag, TagNotes};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// The array under `field`, or nothing when absent or not an array.
pub fn collection<'a>(payload: &'a Value, field: &str) -> &'a [Value] {
    payload
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Decode each element of `field`, skipping elements that do not fit `T`.
pub fn decode_items<T: DeserializeOwned>(payload: &Value, field: &str) -> Vec<T> {
    collection(payload, field)
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(field, index, error = %e, "Skipping malformed item");
                None
            }
        })
        .collect()
}

/// Images come as `[url, filename]` pairs; pairs without a filename are dropped.
pub fn image_entries(payload: &Value) -> Vec<ImageEntry> {
    collection(payload, "images")
        .iter()
        .filter_map(|pair| {
            let filename = pair.get(1).and_then(Value::as_str).unwrap_or_default();
            if filename.is_empty() {
                warn!(?pair, "Skipping image entry without filename");
                return None;
            }
            let url = pair.get(0).and_then(Value::as_str).unwrap_or_default();
            Some(ImageEntry::new(url, filename))
        })
        .collect()
}

pub fn note_envelope(payload: &Value) -> Result<Note, DomainError> {
    let note = payload
        .get("note")
        .filter(|n| n.is_object())
        .ok_or_else(|| DomainError::Format("response has no note object".to_string()))?;
    Note::deserialize(note).map_err(|e| DomainError::Format(format!("bad note: {e}")))
}

pub fn tag_notes(payload: &Value) -> TagNotes {
    let notes: Vec<Note> = decode_items(payload, "notes");
    let total = payload
        .get("total")
        .and_then(Value::as_u64)
        .unwrap_or(notes.len() as u64);
    let tag_name = payload
        .pointer("/tag/name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    TagNotes {
        tag_name,
        total,
        notes,
    }
}

pub fn tags(payload: &Value) -> Vec<Tag> {
    decode_items(payload, "tags")
}

/// The `message` field, or an empty string
pub fn message(payload: &Value) -> String {
    payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Required string field, e.g. the `url` of an upload or share response
pub fn required_str(payload: &Value, field: &str) -> Result<String, DomainError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DomainError::Format(format!("response has no {field}")))
}

/// Human-readable reason from an error body (`detail` or `message`).
pub fn error_detail(payload: &Value) -> String {
    match payload.get("detail").or_else(|| payload.get("message")) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
