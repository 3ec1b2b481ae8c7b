// src/ports/mod.rs
pub mod console;
pub mod html;

pub use console::ConsolePresenter;
pub use html::HtmlPresenter;
