// src/application/note_editor.rs
use crate::application::NotesApi;
use crate::domain::{DomainError, EditingSession, Note, NoteDraft, NoteId, SaveReceipt, SaveTarget};
use tracing::{debug, info, instrument};

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedNote {
    pub target: SaveTarget,
    pub receipt: SaveReceipt,
}

impl SavedNote {
    /// Lines to show the user; creates also report the stored length.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![self.receipt.message.clone()];
        if self.target == SaveTarget::Create {
            if let Some(length) = self.receipt.content_length {
                lines.push(format!("Content length: {length} characters"));
            }
        }
        lines
    }
}

/// Note editor holding its own editing session.
pub struct NoteEditor<R: NotesApi> {
    api: R,
    session: EditingSession,
}

impl<R: NotesApi> NoteEditor<R> {
    pub fn new(api: R) -> Self {
        Self {
            api,
            session: EditingSession::new(),
        }
    }

    pub fn session(&self) -> EditingSession {
        self.session
    }

    pub fn open_for_create(&mut self) {
        self.session.open_for_create();
    }

    /// Fetch a note and start editing it.
    ///
    /// A note without content is reported as a format error and leaves the
    /// session untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn open_for_edit(&mut self, id: NoteId) -> Result<Note, DomainError> {
        let note = self.api.get_note(id)?;
        if note.content.is_empty() {
            return Err(DomainError::Format(format!("note {id} has no content")));
        }
        self.session.open_for_edit(id);
        debug!(note_id = id, "Editing session opened");
        Ok(note)
    }

    pub fn cancel(&mut self) {
        self.session.close();
    }

    #[instrument(level = "debug", skip(self, draft), fields(target = ?self.session.target()))]
    pub fn save(&mut self, draft: NoteDraft) -> Result<SavedNote, DomainError> {
        if draft.content.is_empty() {
            return Err(DomainError::EmptyContent);
        }

        let target = self.session.target();
        let receipt = match target {
            SaveTarget::Create => self.api.create_note(&draft)?,
            SaveTarget::Update(id) => self.api.update_note(id, &draft)?,
        };

        self.session.close();
        info!(?target, "Note saved");
        Ok(SavedNote { target, receipt })
    }

    pub fn api_mut(&mut self) -> &mut R {
        &mut self.api
    }
}
