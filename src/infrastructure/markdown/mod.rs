// src/infrastructure/markdown/mod.rs
pub mod converter;
pub mod image_ref;

pub use converter::MarkdownConverter;
pub use image_ref::{ImageNormalizer, ImageSize, ImageSource, ResolvedImage};
