// src/infrastructure/renderer.rs
use crate::constants::BROWSER_LAUNCH_DELAY_MS;
use crate::domain::DomainError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use tracing::{debug, instrument};

/// Writes generated pages to a temp dir and hands them to the browser.
#[derive(Debug)]
pub struct ContentRenderer {
    // Last dir is held so the page survives until the browser reads it
    temp_dir: Option<TempDir>,
    keep_files: bool,
}

impl ContentRenderer {
    pub fn new() -> Self {
        Self {
            temp_dir: None,
            keep_files: false,
        }
    }

    /// Pages outlive the process, so their path can be printed and opened later.
    pub fn keeping_files() -> Self {
        Self {
            temp_dir: None,
            keep_files: true,
        }
    }

    pub fn create_temp_file(&mut self, name: &str, content: &str) -> Result<PathBuf, DomainError> {
        let temp_dir = Builder::new()
            .prefix("notedesk-")
            .rand_bytes(5)
            .tempdir()?;

        let file_path = temp_dir.path().join(name);
        File::create(&file_path)?.write_all(content.as_bytes())?;
        debug!(path = %file_path.display(), bytes = content.len(), "Page written");

        if self.keep_files {
            let _ = temp_dir.into_path();
        } else {
            self.temp_dir = Some(temp_dir);
        }
        Ok(file_path)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn open_in_browser(&mut self, path: &Path) -> Result<(), DomainError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| DomainError::Browser(format!("non UTF-8 path {}", path.display())))?;

        #[cfg(target_os = "macos")]
        let spawned = std::process::Command::new("open").arg(path_str).spawn();
        #[cfg(target_os = "windows")]
        let spawned = std::process::Command::new("cmd")
            .args(["/C", "start", path_str])
            .spawn();
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let spawned = std::process::Command::new("xdg-open").arg(path_str).spawn();

        spawned.map_err(|e| DomainError::Browser(e.to_string()))?;

        std::thread::sleep(std::time::Duration::from_millis(BROWSER_LAUNCH_DELAY_MS));
        Ok(())
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_html_when_creating_temp_file_then_writes_page() {
        // Arrange
        let mut renderer = ContentRenderer::new();

        // Act
        let path = renderer.create_temp_file("notes.html", "<p>hi</p>").unwrap();

        // Assert
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>hi</p>");
        assert!(path.ends_with("notes.html"));
    }

    #[test]
    fn given_kept_files_when_renderer_dropped_then_page_remains() {
        let path = {
            let mut renderer = ContentRenderer::keeping_files();
            renderer.create_temp_file("keep.html", "x").unwrap()
        };
        assert!(path.exists());
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn given_default_renderer_when_dropped_then_page_is_removed() {
        let path = {
            let mut renderer = ContentRenderer::new();
            renderer.create_temp_file("gone.html", "x").unwrap()
        };
        assert!(!path.exists());
    }
}
