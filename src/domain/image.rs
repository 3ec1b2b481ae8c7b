// src/domain/image.rs
use serde::Serialize;

/// One stored image as listed by the server: a `[url, filename]` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageEntry {
    pub url: String,
    pub filename: String,
}

impl ImageEntry {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }
}
