// src/domain/mod.rs
pub mod error;
pub mod file;
pub mod image;
pub mod note;
pub mod session;
pub mod tag;

pub use error::DomainError;
pub use file::{FileKind, StoredFile, UploadReceipt};
pub use image::ImageEntry;
pub use note::{Note, NoteDraft, NoteId, NoteQuery, SaveReceipt};
pub use session::{EditingSession, SaveTarget};
pub use tag::{Tag, TagNotes};
