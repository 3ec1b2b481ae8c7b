// src/application/remover.rs
use crate::application::{Confirm, FilesApi, ImagesApi, NotesApi, TagsApi};
use crate::domain::{DomainError, NoteId};
use tracing::debug;

const FILE_DELETED: &str = "File deleted successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The user said no; nothing was sent.
    Declined,
    Removed(String),
}

/// Deletes notes, images, files and tags after asking for confirmation.
pub struct Remover<R, C: Confirm> {
    api: R,
    confirm: C,
}

impl<R, C: Confirm> Remover<R, C> {
    pub fn new(api: R, confirm: C) -> Self {
        Self { api, confirm }
    }

    fn confirmed<F>(&mut self, question: &str, delete: F) -> Result<Removal, DomainError>
    where
        F: FnOnce(&mut R) -> Result<String, DomainError>,
    {
        if !self.confirm.confirm(question) {
            debug!(question, "Deletion declined");
            return Ok(Removal::Declined);
        }
        delete(&mut self.api).map(Removal::Removed)
    }
}

impl<R: NotesApi, C: Confirm> Remover<R, C> {
    pub fn delete_note(&mut self, id: NoteId) -> Result<Removal, DomainError> {
        self.confirmed("Delete this note?", |api| api.delete_note(id))
    }
}

impl<R: ImagesApi, C: Confirm> Remover<R, C> {
    pub fn delete_image(&mut self, filename: &str) -> Result<Removal, DomainError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(DomainError::InvalidFilename);
        }
        self.confirmed("Delete this image?", |api| api.delete_image(filename))
    }
}

impl<R: FilesApi, C: Confirm> Remover<R, C> {
    pub fn delete_file(&mut self, id: i64) -> Result<Removal, DomainError> {
        self.confirmed("Delete this file?", |api| {
            let message = api.delete_file(id)?;
            Ok(if message.is_empty() {
                FILE_DELETED.to_string()
            } else {
                message
            })
        })
    }
}

impl<R: TagsApi, C: Confirm> Remover<R, C> {
    pub fn delete_tag(&mut self, id: i64) -> Result<Removal, DomainError> {
        self.confirmed(
            "Delete this tag? Notes keep their content.",
            |api| api.delete_tag(id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileKind;
    use crate::util::testing::{ApiCall, MockBackend, ScriptedConfirm};

    #[test]
    fn given_declined_confirmation_when_deleting_note_then_no_network_call() {
        // Arrange
        let mock = MockBackend::builder().with_note(1, "keep me").build();
        let log = mock.call_log();
        let mut remover = Remover::new(mock, ScriptedConfirm::declining());

        // Act
        let result = remover.delete_note(1).expect("Declining is not an error");

        // Assert
        assert_eq!(result, Removal::Declined);
        assert!(log.is_empty());
        assert!(remover.api.note(1).is_some());
    }

    #[test]
    fn given_declined_confirmation_for_any_resource_then_nothing_is_sent() {
        let mock = MockBackend::builder()
            .with_image("a.png")
            .with_file(3, "f.zip", FileKind::Archive)
            .with_tag(4, "t")
            .build();
        let log = mock.call_log();
        let mut remover = Remover::new(mock, ScriptedConfirm::declining());

        assert_eq!(remover.delete_image("a.png").unwrap(), Removal::Declined);
        assert_eq!(remover.delete_file(3).unwrap(), Removal::Declined);
        assert_eq!(remover.delete_tag(4).unwrap(), Removal::Declined);
        assert!(log.is_empty());
        assert_eq!(remover.confirm.questions.len(), 3);
    }

    #[test]
    fn given_accepted_confirmation_when_deleting_note_then_returns_server_message() {
        let mock = MockBackend::builder().with_note(1, "bye").build();
        let log = mock.call_log();
        let mut remover = Remover::new(mock, ScriptedConfirm::accepting());

        let result = remover.delete_note(1).unwrap();

        assert_eq!(result, Removal::Removed("Note deleted successfully".to_string()));
        assert_eq!(log.calls(), vec![ApiCall::DeleteNote(1)]);
    }

    #[test]
    fn given_empty_filename_when_deleting_image_then_fails_before_asking() {
        let mock = MockBackend::builder().build();
        let log = mock.call_log();
        let mut remover = Remover::new(mock, ScriptedConfirm::accepting());

        let result = remover.delete_image("  ");

        assert!(matches!(result, Err(DomainError::InvalidFilename)));
        assert!(remover.confirm.questions.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn given_missing_note_when_deleting_then_propagates_http_error() {
        let mut remover = Remover::new(MockBackend::builder().build(), ScriptedConfirm::accepting());

        let result = remover.delete_note(99);

        assert!(matches!(result, Err(DomainError::Http { status: 404, .. })));
    }
}
