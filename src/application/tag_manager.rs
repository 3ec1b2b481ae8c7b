// src/application/tag_manager.rs
use crate::application::TagsApi;
use crate::domain::{DomainError, Tag, TagNotes};
use tracing::info;

pub struct TagManager<R: TagsApi> {
    api: R,
}

impl<R: TagsApi> TagManager<R> {
    pub fn new(api: R) -> Self {
        Self { api }
    }

    pub fn list_tags(&mut self) -> Result<Vec<Tag>, DomainError> {
        self.api.list_tags()
    }

    pub fn search_tags(&mut self, query: &str) -> Result<Vec<Tag>, DomainError> {
        self.api.search_tags(query.trim())
    }

    pub fn rename_tag(&mut self, id: i64, name: &str) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidTagName);
        }
        let message = self.api.rename_tag(id, name)?;
        info!(tag_id = id, name, "Tag renamed");
        Ok(message)
    }

    pub fn notes_for_tag(&mut self, id: i64) -> Result<TagNotes, DomainError> {
        self.api.tag_notes(id)
    }
}
