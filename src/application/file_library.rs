// src/application/file_library.rs
use crate::application::FilesApi;
use crate::domain::{DomainError, FileKind, StoredFile, UploadReceipt};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// What the media viewer needs to show one file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPreview {
    pub title: String,
    pub kind: FileKind,
    /// Server-relative path of the media stream
    pub path: String,
}

pub struct FileLibrary<R: FilesApi> {
    api: R,
}

impl<R: FilesApi> FileLibrary<R> {
    pub fn new(api: R) -> Self {
        Self { api }
    }

    pub fn list_files(&mut self) -> Result<Vec<StoredFile>, DomainError> {
        self.api.list_files()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn upload(&mut self, path: &Path) -> Result<UploadReceipt, DomainError> {
        ensure_readable(path)?;
        let receipt = self.api.upload_file(path)?;
        info!(filename = %receipt.filename, "File uploaded");
        Ok(receipt)
    }

    /// Download a stored file, returning where it was written
    pub fn download(&mut self, filename: &str, dest: Option<&Path>) -> Result<PathBuf, DomainError> {
        let bytes = self.api.download_file(filename)?;
        write_download(&bytes, filename, dest)
    }

    pub fn find(&mut self, id: i64) -> Result<StoredFile, DomainError> {
        self.api
            .list_files()?
            .into_iter()
            .find(|f| f.id == id)
            .ok_or(DomainError::UnknownFile(id))
    }

    /// Only images and videos can be previewed
    pub fn preview(&mut self, id: i64) -> Result<MediaPreview, DomainError> {
        let file = self.find(id)?;
        if !file.kind.is_previewable() {
            return Err(DomainError::NotPreviewable(file.display_name().to_string()));
        }
        Ok(MediaPreview {
            title: file.display_name().to_string(),
            kind: file.kind,
            path: file.download_path(),
        })
    }
}

pub(crate) fn ensure_readable(path: &Path) -> Result<(), DomainError> {
    if !path.is_file() {
        return Err(DomainError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Write downloaded bytes to `dest`, or to a directory `dest`, or to the
/// current directory. Only the last component of `filename` is used.
pub(crate) fn write_download(
    bytes: &[u8],
    filename: &str,
    dest: Option<&Path>,
) -> Result<PathBuf, DomainError> {
    let name = Path::new(filename)
        .file_name()
        .ok_or(DomainError::InvalidFilename)?;
    let target = match dest {
        Some(dir) if dir.is_dir() => dir.join(name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(name),
    };
    std::fs::write(&target, bytes)?;
    debug!(path = %target.display(), bytes = bytes.len(), "Download written");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{ApiCall, MockBackend};

    #[test]
    fn given_missing_local_file_when_uploading_then_no_request() {
        let mock = MockBackend::builder().build();
        let log = mock.call_log();
        let mut library = FileLibrary::new(mock);

        let result = library.upload(Path::new("/definitely/not/here.bin"));

        assert!(matches!(result, Err(DomainError::FileNotFound(_))));
        assert!(log.is_empty());
    }

    #[test]
    fn given_existing_file_when_uploading_then_sends_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        let mock = MockBackend::builder().build();
        let log = mock.call_log();
        let mut library = FileLibrary::new(mock);

        let receipt = library.upload(&path).unwrap();

        assert_eq!(receipt.filename, "report.pdf");
        assert_eq!(log.calls(), vec![ApiCall::UploadFile(path)]);
    }

    #[test]
    fn given_directory_destination_when_downloading_then_writes_inside_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut library =
            FileLibrary::new(MockBackend::builder().with_blob("ab12.txt", b"hello").build());

        let written = library.download("ab12.txt", Some(dir.path())).unwrap();

        assert_eq!(written, dir.path().join("ab12.txt"));
        assert_eq!(std::fs::read(written).unwrap(), b"hello");
    }

    #[test]
    fn given_traversal_in_filename_when_writing_then_keeps_last_component() {
        let dir = tempfile::tempdir().unwrap();

        let written = write_download(b"x", "../../etc/evil", Some(dir.path())).unwrap();

        assert_eq!(written, dir.path().join("evil"));
    }

    #[test]
    fn given_video_when_previewing_then_returns_download_path() {
        let mut library =
            FileLibrary::new(MockBackend::builder().with_file(2, "cafe.mp4", FileKind::Video).build());

        let preview = library.preview(2).unwrap();

        assert_eq!(preview.kind, FileKind::Video);
        assert_eq!(preview.path, "/files/download/cafe.mp4");
        assert_eq!(preview.title, "original-cafe.mp4");
    }

    #[test]
    fn given_document_when_previewing_then_not_previewable() {
        let mut library = FileLibrary::new(
            MockBackend::builder().with_file(2, "a.docx", FileKind::Document).build(),
        );

        assert!(matches!(library.preview(2), Err(DomainError::NotPreviewable(_))));
        assert!(matches!(library.preview(3), Err(DomainError::UnknownFile(3))));
    }
}
