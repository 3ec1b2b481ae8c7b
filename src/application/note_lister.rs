// src/application/note_lister.rs
use crate::application::NotesApi;
use crate::domain::{DomainError, Note, NoteQuery};

pub struct NoteLister<R: NotesApi> {
    repository: R,
}

impl<R: NotesApi> NoteLister<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// List notes, newest first, optionally filtered by tag and paged
    pub fn list_notes(&mut self, query: &NoteQuery) -> Result<Vec<Note>, DomainError> {
        self.repository.list_notes(query)
    }

    pub fn view_note(&mut self, id: i64) -> Result<Note, DomainError> {
        self.repository.get_note(id)
    }
}
