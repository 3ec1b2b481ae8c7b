// src/util/text.rs
use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLOCK_TAG_REGEX: Regex =
        Regex::new(r"</?(p|div|br|li|pre|blockquote|h[1-6])[^>]*>").unwrap();
    static ref ANY_TAG_REGEX: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Extract the first line of plain text from HTML content.
///
/// This function:
/// 1. Decodes HTML entities (e.g., &amp; -> &)
/// 2. Removes all HTML tags
/// 3. Extracts the first non-empty line
/// 4. Trims whitespace
///
/// # Examples
///
/// ```
/// use notedesk::util::text::extract_first_line;
///
/// let html = "<h1>Shopping list</h1><p>Second line</p>";
/// let first_line = extract_first_line(html);
/// assert_eq!(first_line, "Shopping list");
/// ```
pub fn extract_first_line(html: &str) -> String {
    // Decode HTML entities first
    let decoded = decode_html_entities(html).to_string();

    // Block-level tags become line breaks
    let with_newlines = BLOCK_TAG_REGEX.replace_all(&decoded, "\n");
    let no_tags = ANY_TAG_REGEX.replace_all(&with_newlines, "");

    // Split by newlines and find first non-empty line
    no_tags
        .lines()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Human readable size with one decimal above bytes: `512 B`, `1.5 KB`, `2.0 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    match bytes {
        b if b < KIB => format!("{b} B"),
        b if b < MIB => format!("{:.1} KB", b as f64 / KIB as f64),
        b if b < GIB => format!("{:.1} MB", b as f64 / MIB as f64),
        b => format!("{:.1} GB", b as f64 / GIB as f64),
    }
}
