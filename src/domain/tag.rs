// src/domain/tag.rs
use crate::domain::Note;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub note_count: u64,
}

/// Notes carrying one tag, plus the tag itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TagNotes {
    pub tag_name: String,
    pub total: u64,
    pub notes: Vec<Note>,
}
