// src/domain/note.rs
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

pub type NoteId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, deserialize_with = "tag_names")]
    pub tags: Vec<String>,
}

/// Tags arrive either as plain names or as `{id, name}` objects depending on
/// the endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagRef {
    Name(String),
    Object { name: String },
}

fn tag_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let refs: Option<Vec<TagRef>> = Option::deserialize(deserializer)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(|r| match r {
            TagRef::Name(name) | TagRef::Object { name } => name,
        })
        .collect())
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub content: String,
    pub tags: Option<Vec<String>>,
}

impl NoteDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tags: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Content as base64 over its UTF-8 bytes.
    pub fn encoded_content(&self) -> String {
        STANDARD.encode(self.content.as_bytes())
    }

    pub fn to_wire(&self) -> serde_json::Value {
        let mut body = json!({ "content": self.encoded_content() });
        if let Some(tags) = &self.tags {
            body["tags"] = json!(tags);
        }
        body
    }
}

/// What the server echoes back after a save.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SaveReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub note_id: Option<NoteId>,
    #[serde(default)]
    pub content_length: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteQuery {
    pub tag: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl NoteQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}
