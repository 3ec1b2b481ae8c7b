// src/application/mod.rs
pub mod file_library;
pub mod file_sharer;
pub mod gateway;
pub mod image_library;
pub mod interaction;
pub mod note_editor;
pub mod note_lister;
pub mod remover;
pub mod tag_manager;

pub use file_library::{FileLibrary, MediaPreview};
pub use file_sharer::{FileSharer, SharedLink};
pub use gateway::{FilesApi, ImagesApi, NotesApi, ShareApi, TagsApi};
pub use image_library::ImageLibrary;
pub use interaction::{Clipboard, Confirm};
pub use note_editor::{NoteEditor, SavedNote};
pub use note_lister::NoteLister;
pub use remover::{Removal, Remover};
pub use tag_manager::TagManager;
