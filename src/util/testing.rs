// src/util/testing.rs

use anyhow::Result;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{
    Clipboard, Confirm, FilesApi, ImagesApi, NotesApi, ShareApi, TagsApi,
};
use crate::domain::{
    DomainError, FileKind, ImageEntry, Note, NoteDraft, NoteId, NoteQuery, SaveReceipt,
    StoredFile, Tag, TagNotes, UploadReceipt,
};

/// Every request the mock received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListNotes(NoteQuery),
    GetNote(NoteId),
    CreateNote(NoteDraft),
    UpdateNote(NoteId, NoteDraft),
    DeleteNote(NoteId),
    ListImages,
    UploadImage(PathBuf),
    DeleteImage(String),
    GetImage(String),
    ListFiles,
    UploadFile(PathBuf),
    DeleteFile(i64),
    DownloadFile(String),
    CreateShare(i64),
    ListTags,
    SearchTags(String),
    RenameTag(i64, String),
    DeleteTag(i64),
    TagNotes(i64),
}

/// Shared handle on the calls a `MockBackend` recorded; stays readable after
/// the mock has been moved into a use case.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<ApiCall>>>);

impl CallLog {
    fn push(&self, call: ApiCall) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[derive(Debug, Clone)]
enum Failure {
    Http(u16, String),
    Network(String),
}

/// In-memory stand-in for the notes server implementing every API port.
///
/// # Examples
///
/// ```
/// use notedesk::application::NotesApi;
/// use notedesk::domain::NoteQuery;
/// use notedesk::util::testing::MockBackend;
///
/// let mut mock = MockBackend::builder()
///     .with_note(1, "# Hello")
///     .build();
/// let log = mock.call_log();
///
/// let notes = mock.list_notes(&NoteQuery::default()).unwrap();
/// assert_eq!(notes.len(), 1);
/// assert_eq!(log.len(), 1);
/// ```
pub struct MockBackend {
    notes: BTreeMap<NoteId, Note>,
    images: Vec<ImageEntry>,
    files: Vec<StoredFile>,
    tags: Vec<Tag>,
    blobs: HashMap<String, Vec<u8>>,
    share_prefix: String,
    failure: Option<Failure>,
    log: CallLog,
}

impl MockBackend {
    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::new()
    }

    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    fn check(&self) -> Result<(), DomainError> {
        match &self.failure {
            Some(Failure::Http(status, message)) => Err(DomainError::Http {
                status: *status,
                message: message.clone(),
            }),
            Some(Failure::Network(message)) => Err(DomainError::Network(message.clone())),
            None => Ok(()),
        }
    }

    fn not_found(what: &str) -> DomainError {
        DomainError::Http {
            status: 404,
            message: format!("{what} not found"),
        }
    }
}

impl NotesApi for MockBackend {
    fn list_notes(&mut self, query: &NoteQuery) -> Result<Vec<Note>, DomainError> {
        self.log.push(ApiCall::ListNotes(query.clone()));
        self.check()?;
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.unwrap_or(50) as usize;
        Ok(self
            .notes
            .values()
            .rev()
            .filter(|n| query.tag.as_ref().map_or(true, |t| n.tags.contains(t)))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn get_note(&mut self, id: NoteId) -> Result<Note, DomainError> {
        self.log.push(ApiCall::GetNote(id));
        self.check()?;
        self.notes.get(&id).cloned().ok_or_else(|| Self::not_found("Note"))
    }

    fn create_note(&mut self, draft: &NoteDraft) -> Result<SaveReceipt, DomainError> {
        self.log.push(ApiCall::CreateNote(draft.clone()));
        self.check()?;
        let id = self.notes.keys().next_back().map_or(1, |last| last + 1);
        self.notes.insert(
            id,
            Note {
                id,
                content: draft.content.clone(),
                created_at: "2024-05-01 12:00:00".to_string(),
                tags: draft.tags.clone().unwrap_or_default(),
            },
        );
        Ok(SaveReceipt {
            message: "Markdown saved to database successfully!".to_string(),
            note_id: Some(id),
            content_length: Some(draft.content.chars().count() as u64),
        })
    }

    fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> Result<SaveReceipt, DomainError> {
        self.log.push(ApiCall::UpdateNote(id, draft.clone()));
        self.check()?;
        let note = self.notes.get_mut(&id).ok_or_else(|| Self::not_found("Note"))?;
        note.content = draft.content.clone();
        if let Some(tags) = &draft.tags {
            note.tags = tags.clone();
        }
        Ok(SaveReceipt {
            message: "Note updated successfully".to_string(),
            ..SaveReceipt::default()
        })
    }

    fn delete_note(&mut self, id: NoteId) -> Result<String, DomainError> {
        self.log.push(ApiCall::DeleteNote(id));
        self.check()?;
        self.notes
            .remove(&id)
            .map(|_| "Note deleted successfully".to_string())
            .ok_or_else(|| Self::not_found("Note"))
    }
}

impl ImagesApi for MockBackend {
    fn list_images(&mut self) -> Result<Vec<ImageEntry>, DomainError> {
        self.log.push(ApiCall::ListImages);
        self.check()?;
        Ok(self.images.clone())
    }

    fn upload_image(&mut self, path: &Path) -> Result<String, DomainError> {
        self.log.push(ApiCall::UploadImage(path.to_path_buf()));
        self.check()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let url = format!("http://127.0.0.1:8000/images/get/{name}");
        self.images.push(ImageEntry::new(url.clone(), name));
        Ok(url)
    }

    fn delete_image(&mut self, filename: &str) -> Result<String, DomainError> {
        self.log.push(ApiCall::DeleteImage(filename.to_string()));
        self.check()?;
        let before = self.images.len();
        self.images.retain(|i| i.filename != filename);
        if self.images.len() == before {
            return Err(Self::not_found("Image"));
        }
        Ok("Image deleted successfully".to_string())
    }

    fn get_image(&mut self, filename: &str) -> Result<Vec<u8>, DomainError> {
        self.log.push(ApiCall::GetImage(filename.to_string()));
        self.check()?;
        self.blobs
            .get(filename)
            .cloned()
            .ok_or_else(|| Self::not_found("Image"))
    }
}

impl FilesApi for MockBackend {
    fn list_files(&mut self) -> Result<Vec<StoredFile>, DomainError> {
        self.log.push(ApiCall::ListFiles);
        self.check()?;
        Ok(self.files.clone())
    }

    fn upload_file(&mut self, path: &Path) -> Result<UploadReceipt, DomainError> {
        self.log.push(ApiCall::UploadFile(path.to_path_buf()));
        self.check()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = self.files.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        self.files.push(StoredFile {
            id,
            url: None,
            filename: name.clone(),
            original_filename: name.clone(),
            size: 0,
            kind: FileKind::Other,
            created_at: None,
        });
        Ok(UploadReceipt {
            filename: name.clone(),
            original_filename: name,
            ..UploadReceipt::default()
        })
    }

    fn delete_file(&mut self, id: i64) -> Result<String, DomainError> {
        self.log.push(ApiCall::DeleteFile(id));
        self.check()?;
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        if self.files.len() == before {
            return Err(Self::not_found("File"));
        }
        Ok("File deleted successfully".to_string())
    }

    fn download_file(&mut self, filename: &str) -> Result<Vec<u8>, DomainError> {
        self.log.push(ApiCall::DownloadFile(filename.to_string()));
        self.check()?;
        self.blobs
            .get(filename)
            .cloned()
            .ok_or_else(|| Self::not_found("File"))
    }
}

impl TagsApi for MockBackend {
    fn list_tags(&mut self) -> Result<Vec<Tag>, DomainError> {
        self.log.push(ApiCall::ListTags);
        self.check()?;
        Ok(self.tags.clone())
    }

    fn search_tags(&mut self, query: &str) -> Result<Vec<Tag>, DomainError> {
        self.log.push(ApiCall::SearchTags(query.to_string()));
        self.check()?;
        Ok(self
            .tags
            .iter()
            .filter(|t| t.name.contains(query))
            .cloned()
            .collect())
    }

    fn rename_tag(&mut self, id: i64, name: &str) -> Result<String, DomainError> {
        self.log.push(ApiCall::RenameTag(id, name.to_string()));
        self.check()?;
        let tag = self
            .tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found("Tag"))?;
        tag.name = name.to_string();
        Ok("Tag updated successfully".to_string())
    }

    fn delete_tag(&mut self, id: i64) -> Result<String, DomainError> {
        self.log.push(ApiCall::DeleteTag(id));
        self.check()?;
        let before = self.tags.len();
        self.tags.retain(|t| t.id != id);
        if self.tags.len() == before {
            return Err(Self::not_found("Tag"));
        }
        Ok("Tag deleted successfully".to_string())
    }

    fn tag_notes(&mut self, id: i64) -> Result<TagNotes, DomainError> {
        self.log.push(ApiCall::TagNotes(id));
        self.check()?;
        let tag = self
            .tags
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found("Tag"))?;
        let notes: Vec<Note> = self
            .notes
            .values()
            .filter(|n| n.tags.contains(&tag.name))
            .cloned()
            .collect();
        Ok(TagNotes {
            tag_name: tag.name.clone(),
            total: notes.len() as u64,
            notes,
        })
    }
}

impl ShareApi for MockBackend {
    fn create_share_link(&mut self, file_id: i64) -> Result<String, DomainError> {
        self.log.push(ApiCall::CreateShare(file_id));
        self.check()?;
        if !self.files.iter().any(|f| f.id == file_id) {
            return Err(Self::not_found("File"));
        }
        Ok(format!("{}{file_id}", self.share_prefix))
    }
}

/// Builder for MockBackend
pub struct MockBackendBuilder {
    notes: BTreeMap<NoteId, Note>,
    images: Vec<ImageEntry>,
    files: Vec<StoredFile>,
    tags: Vec<Tag>,
    blobs: HashMap<String, Vec<u8>>,
    share_prefix: String,
    failure: Option<Failure>,
}

impl MockBackendBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            images: vec![],
            files: vec![],
            tags: vec![],
            blobs: HashMap::new(),
            share_prefix: "/share/code".to_string(),
            failure: None,
        }
    }

    /// Add a note with the given Markdown content and no tags
    pub fn with_note(self, id: NoteId, content: &str) -> Self {
        self.with_full_note(Note {
            id,
            content: content.to_string(),
            created_at: "2024-04-30 08:15:00".to_string(),
            tags: vec![],
        })
    }

    pub fn with_full_note(mut self, note: Note) -> Self {
        self.notes.insert(note.id, note);
        self
    }

    pub fn with_image(mut self, filename: &str) -> Self {
        self.images.push(ImageEntry::new(
            format!("http://127.0.0.1:8000/images/get/{filename}"),
            filename,
        ));
        self
    }

    pub fn with_file(mut self, id: i64, filename: &str, kind: FileKind) -> Self {
        self.files.push(StoredFile {
            id,
            url: None,
            filename: filename.to_string(),
            original_filename: format!("original-{filename}"),
            size: 2048,
            kind,
            created_at: None,
        });
        self
    }

    pub fn with_tag(mut self, id: i64, name: &str) -> Self {
        self.tags.push(Tag {
            id,
            name: name.to_string(),
            note_count: 0,
        });
        self
    }

    /// Bytes served for `get_image` / `download_file`
    pub fn with_blob(mut self, filename: &str, bytes: &[u8]) -> Self {
        self.blobs.insert(filename.to_string(), bytes.to_vec());
        self
    }

    /// Make every call fail with the given HTTP status
    pub fn with_http_failure(mut self, status: u16, message: &str) -> Self {
        self.failure = Some(Failure::Http(status, message.to_string()));
        self
    }

    /// Make every call fail as if the server were unreachable
    pub fn with_network_failure(mut self, message: &str) -> Self {
        self.failure = Some(Failure::Network(message.to_string()));
        self
    }

    pub fn build(self) -> MockBackend {
        MockBackend {
            notes: self.notes,
            images: self.images,
            files: self.files,
            tags: self.tags,
            blobs: self.blobs,
            share_prefix: self.share_prefix,
            failure: self.failure,
            log: CallLog::default(),
        }
    }
}

impl Default for MockBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Confirmation double answering every question the same way
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answer: bool,
    pub questions: Vec<String>,
}

impl ScriptedConfirm {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            questions: vec![],
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            questions: vec![],
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answer
    }
}

#[derive(Debug, Default)]
pub struct MockClipboard {
    refuse: bool,
    pub copied: Vec<String>,
}

impl MockClipboard {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            copied: vec![],
        }
    }
}

impl Clipboard for MockClipboard {
    fn copy(&mut self, text: &str) -> Result<(), DomainError> {
        if self.refuse {
            return Err(DomainError::Clipboard("permission denied".to_string()));
        }
        self.copied.push(text.to_string());
        Ok(())
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "axum"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_note_added_when_getting_note_then_returns_note() {
        let mut mock = MockBackend::builder().with_note(123, "Body").build();

        let result = mock.get_note(123).expect("Note should exist");
        assert_eq!(result.id, 123);
        assert_eq!(result.content, "Body");
    }

    #[test]
    fn given_no_note_when_getting_note_then_returns_not_found_status() {
        let mut mock = MockBackend::builder().build();

        let result = mock.get_note(999);
        assert!(matches!(result, Err(DomainError::Http { status: 404, .. })));
    }

    #[test]
    fn given_http_failure_configured_when_calling_then_every_call_fails_but_is_recorded() {
        let mut mock = MockBackend::builder()
            .with_note(1, "x")
            .with_http_failure(500, "boom")
            .build();
        let log = mock.call_log();

        assert!(mock.list_notes(&NoteQuery::default()).is_err());
        assert!(mock.list_images().is_err());
        assert_eq!(log.calls(), vec![ApiCall::ListNotes(NoteQuery::default()), ApiCall::ListImages]);
    }

    #[test]
    fn given_tagged_notes_when_listing_with_tag_filter_then_returns_matching_only() {
        let mut mock = MockBackend::builder()
            .with_full_note(Note {
                id: 1,
                content: "a".into(),
                created_at: String::new(),
                tags: vec!["work".into()],
            })
            .with_note(2, "b")
            .build();

        let query = NoteQuery {
            tag: Some("work".into()),
            ..NoteQuery::default()
        };
        let result = mock.list_notes(&query).expect("List should succeed");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn given_created_note_when_creating_again_then_ids_increase() {
        let mut mock = MockBackend::builder().with_note(4, "x").build();

        let receipt = mock.create_note(&NoteDraft::new("new")).unwrap();

        assert_eq!(receipt.note_id, Some(5));
        assert_eq!(receipt.content_length, Some(3));
    }
}
