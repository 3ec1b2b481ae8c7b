// src/domain/session.rs
use crate::domain::NoteId;

/// Which note, if any, the editor currently has open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditingSession {
    editing: Option<NoteId>,
}

/// Where a save goes, derived from the session at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(NoteId),
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_for_create(&mut self) {
        self.editing = None;
    }

    pub fn open_for_edit(&mut self, id: NoteId) {
        self.editing = Some(id);
    }

    pub fn close(&mut self) {
        self.editing = None;
    }

    pub fn editing_id(&self) -> Option<NoteId> {
        self.editing
    }

    pub fn target(&self) -> SaveTarget {
        match self.editing {
            Some(id) => SaveTarget::Update(id),
            None => SaveTarget::Create,
        }
    }
}
