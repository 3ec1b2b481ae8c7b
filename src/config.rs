// src/config.rs
use crate::constants::DEFAULT_API_BASE_URL;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// TOML configuration for the client
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Origin share links are resolved against; empty means `base_url`
    #[serde(default)]
    pub share_origin: String,
    /// Zero disables the request timeout
    #[serde(default)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

fn default_base_url() -> String { DEFAULT_API_BASE_URL.to_string() }
fn default_open_browser() -> bool { true }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            share_origin: String::new(),
            timeout_secs: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            open_browser: default_open_browser(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// An explicit path must exist; the default location may be absent.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Loading config");
                Self::load(path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notedesk").join("config.toml"))
    }

    /// `override_url` (from `--base-url`) wins over the file.
    pub fn base_url(&self, override_url: Option<&str>) -> Result<Url> {
        parse_http_url(override_url.unwrap_or(&self.api.base_url))
    }

    pub fn share_origin(&self, base: &Url) -> Result<Url> {
        if self.api.share_origin.trim().is_empty() {
            Ok(base.clone())
        } else {
            parse_http_url(&self.api.share_origin)
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.api.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Unsupported URL scheme {} in {raw}", url.scheme());
    }
    Ok(url)
}
