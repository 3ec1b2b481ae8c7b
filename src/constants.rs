// src/constants.rs
//
// Application-wide constants: server defaults, path schemes and the markup
// fragments the renderers share.

/// Server used when neither the config file nor `--base-url` names one.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Path segment images are served under.
///
/// Used in: `infrastructure/markdown/image_ref.rs`, `ports/html.rs`
pub const IMAGE_PATH_SEGMENT: &str = "/images/get/";

/// Path segment of the retired image route; old notes still reference it.
///
/// Used in: `infrastructure/markdown/image_ref.rs`
pub const LEGACY_IMAGE_SEGMENT: &str = "/get-image/";

/// Bare references ending in one of these are treated as stored images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// References that come out of broken editors or serializers and never
/// point at a real image.
pub const INVALID_IMAGE_REFS: &[&str] = &["[object Object]", "undefined"];

/// Inline SVG shown instead of any image that is invalid or fails to load.
///
/// Quotes are percent-encoded so the value can sit inside a single-quoted
/// JavaScript string in an `onerror` attribute.
pub const IMAGE_PLACEHOLDER: &str = "data:image/svg+xml,%3Csvg xmlns=%27http://www.w3.org/2000/svg%27 width=%27300%27 height=%27200%27 viewBox=%270 0 300 200%27%3E%3Crect width=%27300%27 height=%27200%27 fill=%27%23eee%27/%3E%3Ctext x=%2750%25%27 y=%2750%25%27 font-family=%27Arial%27 font-size=%2716%27 text-anchor=%27middle%27 dominant-baseline=%27middle%27 fill=%27%23999%27%3EImage failed to load%3C/text%3E%3C/svg%3E";

/// Style every Markdown image gets before explicit sizes are appended.
pub const BASE_IMAGE_STYLE: &str =
    "max-width: 100%; border-radius: 4px; box-shadow: 0 2px 8px rgba(0,0,0,0.1);";

/// Alt text for images written without one.
pub const DEFAULT_IMAGE_ALT: &str = "image";

/// Delay in milliseconds after launching the browser before the temporary
/// page may be cleaned up.
///
/// The browser reads the file asynchronously; removing the temp dir right
/// after spawning it can leave an empty tab.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;

/// Editor launched when neither `VISUAL` nor `EDITOR` is set.
pub const FALLBACK_EDITOR: &str = "vi";
