// src/application/image_library.rs
use crate::application::file_library::{ensure_readable, write_download};
use crate::application::ImagesApi;
use crate::domain::{DomainError, ImageEntry};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ImageLibrary<R: ImagesApi> {
    api: R,
}

impl<R: ImagesApi> ImageLibrary<R> {
    pub fn new(api: R) -> Self {
        Self { api }
    }

    pub fn list_images(&mut self) -> Result<Vec<ImageEntry>, DomainError> {
        self.api.list_images()
    }

    /// Upload an image and return the URL the server assigned
    pub fn upload(&mut self, path: &Path) -> Result<String, DomainError> {
        ensure_readable(path)?;
        let url = self.api.upload_image(path)?;
        info!(%url, "Image uploaded");
        Ok(url)
    }

    pub fn download(&mut self, filename: &str, dest: Option<&Path>) -> Result<PathBuf, DomainError> {
        let bytes = self.api.get_image(filename)?;
        write_download(&bytes, filename, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::MockBackend;

    #[test]
    fn given_image_file_when_uploading_then_returns_server_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        let mut library = ImageLibrary::new(MockBackend::builder().build());

        let url = library.upload(&path).unwrap();

        assert_eq!(url, "http://127.0.0.1:8000/images/get/cat.png");
        assert_eq!(library.list_images().unwrap().len(), 1);
    }

    #[test]
    fn given_explicit_destination_when_downloading_then_writes_there() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("renamed.png");
        let mut library =
            ImageLibrary::new(MockBackend::builder().with_blob("h.png", b"img").build());

        let written = library.download("h.png", Some(&dest)).unwrap();

        assert_eq!(written, dest);
        assert_eq!(std::fs::read(dest).unwrap(), b"img");
    }
}
