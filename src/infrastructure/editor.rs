// src/infrastructure/editor.rs
use crate::constants::FALLBACK_EDITOR;
use crate::domain::DomainError;
use std::env;
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::Builder;
use tracing::{debug, instrument};

/// Edits Markdown in the user's `$VISUAL` / `$EDITOR`.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn from_env() -> Self {
        let command = ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
        Self::new(command)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Opens `initial` in the editor and returns the saved text.
    #[instrument(level = "debug", skip(self, initial))]
    pub fn edit(&self, initial: &str) -> Result<String, DomainError> {
        let mut file = Builder::new()
            .prefix("notedesk-")
            .suffix(".md")
            .tempfile()?;
        file.write_all(initial.as_bytes())?;
        file.flush()?;

        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| DomainError::Editor("no editor configured".to_string()))?;
        debug!(program, path = %file.path().display(), "Launching editor");

        let status = Command::new(program)
            .args(parts)
            .arg(file.path())
            .status()
            .map_err(|e| DomainError::Editor(format!("cannot start {program}: {e}")))?;
        if !status.success() {
            return Err(DomainError::Editor(format!("{program} exited with {status}")));
        }

        Ok(fs::read_to_string(file.path())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_blank_command_when_editing_then_returns_editor_error() {
        let editor = ExternalEditor::new("   ");
        assert!(matches!(editor.edit("# hi"), Err(DomainError::Editor(_))));
    }

    #[cfg(unix)]
    #[test]
    fn given_editor_that_leaves_file_untouched_when_editing_then_returns_initial_text() {
        // `true` ignores its argument and exits 0
        let editor = ExternalEditor::new("true");
        assert_eq!(editor.edit("# kept\n").unwrap(), "# kept\n");
    }

    #[cfg(unix)]
    #[test]
    fn given_failing_editor_when_editing_then_returns_editor_error() {
        let editor = ExternalEditor::new("false");
        assert!(matches!(editor.edit("x"), Err(DomainError::Editor(_))));
    }
}
