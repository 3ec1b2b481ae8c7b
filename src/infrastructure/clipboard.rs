// src/infrastructure/clipboard.rs
use crate::application::Clipboard;
use crate::domain::DomainError;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];
#[cfg(target_os = "windows")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Clipboard backed by the platform's copy command.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    fn pipe_into(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }
        Ok(child.wait()?.success())
    }
}

impl Clipboard for SystemClipboard {
    #[instrument(level = "debug", skip(self))]
    fn copy(&mut self, text: &str) -> Result<(), DomainError> {
        let mut failures = Vec::new();
        for (program, args) in COPY_COMMANDS {
            match Self::pipe_into(program, args, text) {
                Ok(true) => {
                    debug!(program, "Copied to clipboard");
                    return Ok(());
                }
                Ok(false) => failures.push(format!("{program} exited with an error")),
                Err(e) => failures.push(format!("{program}: {e}")),
            }
        }
        Err(DomainError::Clipboard(failures.join("; ")))
    }
}
