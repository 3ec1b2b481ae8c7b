// src/application/gateway.rs
//
// Ports onto the notes server. `infrastructure::HttpApi` implements all of
// them; tests use `util::testing::MockBackend`.
use crate::domain::{
    DomainError, ImageEntry, Note, NoteDraft, NoteId, NoteQuery, SaveReceipt, StoredFile, Tag,
    TagNotes, UploadReceipt,
};
use std::path::Path;

pub trait NotesApi {
    fn list_notes(&mut self, query: &NoteQuery) -> Result<Vec<Note>, DomainError>;

    /// Fails with `DomainError::Format` when the response has no `note` object
    fn get_note(&mut self, id: NoteId) -> Result<Note, DomainError>;

    fn create_note(&mut self, draft: &NoteDraft) -> Result<SaveReceipt, DomainError>;

    fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> Result<SaveReceipt, DomainError>;

    /// Returns the server's confirmation message
    fn delete_note(&mut self, id: NoteId) -> Result<String, DomainError>;
}

pub trait ImagesApi {
    fn list_images(&mut self) -> Result<Vec<ImageEntry>, DomainError>;

    /// Returns the URL the server stored the image under
    fn upload_image(&mut self, path: &Path) -> Result<String, DomainError>;

    fn delete_image(&mut self, filename: &str) -> Result<String, DomainError>;

    fn get_image(&mut self, filename: &str) -> Result<Vec<u8>, DomainError>;
}

pub trait FilesApi {
    fn list_files(&mut self) -> Result<Vec<StoredFile>, DomainError>;

    fn upload_file(&mut self, path: &Path) -> Result<UploadReceipt, DomainError>;

    fn delete_file(&mut self, id: i64) -> Result<String, DomainError>;

    fn download_file(&mut self, filename: &str) -> Result<Vec<u8>, DomainError>;
}

pub trait TagsApi {
    fn list_tags(&mut self) -> Result<Vec<Tag>, DomainError>;

    fn search_tags(&mut self, query: &str) -> Result<Vec<Tag>, DomainError>;

    fn rename_tag(&mut self, id: i64, name: &str) -> Result<String, DomainError>;

    fn delete_tag(&mut self, id: i64) -> Result<String, DomainError>;

    fn tag_notes(&mut self, id: i64) -> Result<TagNotes, DomainError>;
}

pub trait ShareApi {
    /// Returns the server-relative share path, e.g. `/share/abc123`
    fn create_share_link(&mut self, file_id: i64) -> Result<String, DomainError>;
}

impl<T: NotesApi + ?Sized> NotesApi for &mut T {
    fn list_notes(&mut self, query: &NoteQuery) -> Result<Vec<Note>, DomainError> {
        (**self).list_notes(query)
    }

    fn get_note(&mut self, id: NoteId) -> Result<Note, DomainError> {
        (**self).get_note(id)
    }

    fn create_note(&mut self, draft: &NoteDraft) -> Result<SaveReceipt, DomainError> {
        (**self).create_note(draft)
    }

    fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> Result<SaveReceipt, DomainError> {
        (**self).update_note(id, draft)
    }

    fn delete_note(&mut self, id: NoteId) -> Result<String, DomainError> {
        (**self).delete_note(id)
    }
}

impl<T: ImagesApi + ?Sized> ImagesApi for &mut T {
    fn list_images(&mut self) -> Result<Vec<ImageEntry>, DomainError> {
        (**self).list_images()
    }

    fn upload_image(&mut self, path: &Path) -> Result<String, DomainError> {
        (**self).upload_image(path)
    }

    fn delete_image(&mut self, filename: &str) -> Result<String, DomainError> {
        (**self).delete_image(filename)
    }

    fn get_image(&mut self, filename: &str) -> Result<Vec<u8>, DomainError> {
        (**self).get_image(filename)
    }
}

impl<T: FilesApi + ?Sized> FilesApi for &mut T {
    fn list_files(&mut self) -> Result<Vec<StoredFile>, DomainError> {
        (**self).list_files()
    }

    fn upload_file(&mut self, path: &Path) -> Result<UploadReceipt, DomainError> {
        (**self).upload_file(path)
    }

    fn delete_file(&mut self, id: i64) -> Result<String, DomainError> {
        (**self).delete_file(id)
    }

    fn download_file(&mut self, filename: &str) -> Result<Vec<u8>, DomainError> {
        (**self).download_file(filename)
    }
}

impl<T: TagsApi + ?Sized> TagsApi for &mut T {
    fn list_tags(&mut self) -> Result<Vec<Tag>, DomainError> {
        (**self).list_tags()
    }

    fn search_tags(&mut self, query: &str) -> Result<Vec<Tag>, DomainError> {
        (**self).search_tags(query)
    }

    fn rename_tag(&mut self, id: i64, name: &str) -> Result<String, DomainError> {
        (**self).rename_tag(id, name)
    }

    fn delete_tag(&mut self, id: i64) -> Result<String, DomainError> {
        (**self).delete_tag(id)
    }

    fn tag_notes(&mut self, id: i64) -> Result<TagNotes, DomainError> {
        (**self).tag_notes(id)
    }
}

impl<T: ShareApi + ?Sized> ShareApi for &mut T {
    fn create_share_link(&mut self, file_id: i64) -> Result<String, DomainError> {
        (**self).create_share_link(file_id)
    }
}
