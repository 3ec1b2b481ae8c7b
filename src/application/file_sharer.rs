// src/application/file_sharer.rs
use crate::application::{Clipboard, ShareApi};
use crate::domain::DomainError;
use tracing::{instrument, warn};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLink {
    pub url: String,
    /// False when the clipboard refused the link and it must be copied by hand
    pub copied: bool,
}

pub struct FileSharer<R: ShareApi, B: Clipboard> {
    api: R,
    clipboard: B,
    origin: Url,
}

impl<R: ShareApi, B: Clipboard> FileSharer<R, B> {
    pub fn new(api: R, clipboard: B, origin: Url) -> Self {
        Self {
            api,
            clipboard,
            origin,
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn share(&mut self, file_id: i64) -> Result<SharedLink, DomainError> {
        let relative = self.api.create_share_link(file_id)?;
        let url = absolute_share_url(&self.origin, &relative)?;

        let copied = match self.clipboard.copy(&url) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Clipboard refused share link");
                false
            }
        };
        Ok(SharedLink { url, copied })
    }
}

/// Join the server-relative share path onto the origin.
pub fn absolute_share_url(origin: &Url, relative: &str) -> Result<String, DomainError> {
    if relative.trim().is_empty() {
        return Err(DomainError::Format("share response has no url".to_string()));
    }
    if relative.starts_with("http://") || relative.starts_with("https://") {
        return Ok(relative.to_string());
    }
    let path = if relative.starts_with('/') {
        relative.to_string()
    } else {
        format!("/{relative}")
    };
    origin
        .join(&path)
        .map(String::from)
        .map_err(|e| DomainError::Format(format!("bad share path {relative}: {e}")))
}
