// src/infrastructure/markdown/image_ref.rs
use crate::constants::{
    BASE_IMAGE_STYLE, DEFAULT_IMAGE_ALT, IMAGE_EXTENSIONS, IMAGE_PATH_SEGMENT, IMAGE_PLACEHOLDER,
    INVALID_IMAGE_REFS, LEGACY_IMAGE_SEGMENT,
};
use html_escape::encode_double_quoted_attribute;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

lazy_static! {
    // "picture.jpg =300x200" or "picture.jpg=300x200": '=' then WIDTHxHEIGHT at the very end
    static ref SIZE_SUFFIX_REGEX: Regex = Regex::new(r"(?s)^(.*?\S)\s*=\s*(\d+)[xX](\d+)\s*$")
        .expect("Failed to compile size suffix regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    /// The embedded SVG; never triggers a network request
    Placeholder,
}

impl ImageSource {
    pub fn as_str(&self) -> &str {
        match self {
            ImageSource::Url(url) => url,
            ImageSource::Placeholder => IMAGE_PLACEHOLDER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub source: ImageSource,
    pub size: Option<ImageSize>,
}

impl ResolvedImage {
    pub fn style(&self) -> String {
        let mut style = BASE_IMAGE_STYLE.to_string();
        if let Some(size) = self.size {
            style.push_str(&format!(" width: {}px; height: {}px;", size.width, size.height));
        }
        style
    }
}

/// Turns whatever a note author wrote as an image reference into a URL
/// the server can actually serve.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    base_url: String,
}

impl ImageNormalizer {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Strip a trailing `=WxH` suffix.
    ///
    /// A suffix that does not parse as two positive integers is ignored and
    /// the reference comes back whole.
    pub fn split_size(reference: &str) -> (&str, Option<ImageSize>) {
        let Some(caps) = SIZE_SUFFIX_REGEX.captures(reference) else {
            return (reference, None);
        };
        let width = caps[2].parse::<u32>().ok().filter(|w| *w > 0);
        let height = caps[3].parse::<u32>().ok().filter(|h| *h > 0);
        match (width, height, caps.get(1)) {
            (Some(width), Some(height), Some(href)) => {
                debug!(width, height, "Image size suffix found");
                (href.as_str(), Some(ImageSize { width, height }))
            }
            _ => (reference, None),
        }
    }

    pub fn resolve(&self, reference: &str) -> ResolvedImage {
        let (href, size) = Self::split_size(reference);
        let href = href.trim();

        if href.is_empty() || INVALID_IMAGE_REFS.contains(&href) {
            warn!(reference, "Invalid image reference, using placeholder");
            return ResolvedImage {
                source: ImageSource::Placeholder,
                size,
            };
        }

        let url = self.resolve_url(href);
        debug!(href, %url, "Resolved image URL");
        ResolvedImage {
            source: ImageSource::Url(url),
            size,
        }
    }

    fn resolve_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }

        if href.contains(LEGACY_IMAGE_SEGMENT) {
            let filename = href.rsplit('/').next().unwrap_or_default();
            return format!("{}{IMAGE_PATH_SEGMENT}{filename}", self.base_url);
        }

        if href.contains(IMAGE_PATH_SEGMENT) {
            let slash = if href.starts_with('/') { "" } else { "/" };
            return format!("{}{slash}{href}", self.base_url);
        }

        if has_image_extension(href) {
            return format!("{}{IMAGE_PATH_SEGMENT}{href}", self.base_url);
        }

        href.to_string()
    }

    /// Render an `<img>` tag that falls back to the placeholder on load errors
    pub fn render(&self, reference: &str, title: &str, alt: &str) -> String {
        let image = self.resolve(reference);
        let alt = if alt.is_empty() { DEFAULT_IMAGE_ALT } else { alt };

        format!(
            r#"<img src="{src}" alt="{alt}" title="{title}" onerror="this.onerror=null;this.src='{placeholder}';" style="{style}">"#,
            src = encode_double_quoted_attribute(image.source.as_str()),
            alt = encode_double_quoted_attribute(alt),
            title = encode_double_quoted_attribute(title),
            placeholder = IMAGE_PLACEHOLDER,
            style = image.style(),
        )
    }
}

fn has_image_extension(href: &str) -> bool {
    href.rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
