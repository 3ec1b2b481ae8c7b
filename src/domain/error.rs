// src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}{}", format_detail(.message))]
    Http { status: u16, message: String },
    /// The server answered, but not with the shape we expect.
    #[error("Unexpected response format: {0}")]
    Format(String),
    #[error("Enter some Markdown content first")]
    EmptyContent,
    #[error("Invalid file name")]
    InvalidFilename,
    #[error("Tag name must not be empty")]
    InvalidTagName,
    #[error("File {0} cannot be previewed (only images and videos)")]
    NotPreviewable(String),
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("No file with id {0}")]
    UnknownFile(i64),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("Editor error: {0}")]
    Editor(String),
    #[error("Browser error: {0}")]
    Browser(String),
}

fn format_detail(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" ({message})")
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Io(e.to_string())
    }
}
