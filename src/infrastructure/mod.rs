// src/infrastructure/mod.rs
pub mod clipboard;
pub mod confirm;
pub mod editor;
pub mod http;
pub mod markdown;
pub mod payload;
pub mod renderer;

pub use clipboard::SystemClipboard;
pub use confirm::{AssumeYes, StdinConfirm};
pub use editor::ExternalEditor;
pub use http::{Health, HttpApi};
pub use markdown::MarkdownConverter;
pub use renderer::ContentRenderer;
