// src/ports/html.rs
use crate::application::MediaPreview;
use crate::constants::{IMAGE_PATH_SEGMENT, IMAGE_PLACEHOLDER};
use crate::domain::{FileKind, ImageEntry, Note, StoredFile, Tag, TagNotes};
use crate::infrastructure::MarkdownConverter;
use crate::util::text::format_file_size;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use tracing::instrument;

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 960px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }
        .card {
            background: white;
            border-radius: 8px;
            padding: 1.5rem 2rem;
            margin-bottom: 1rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        .card.error {
            background: #fdecea;
            color: #b71c1c;
            border-left: 4px solid #e53935;
        }
        .grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
            gap: 1rem;
        }
        .grid .card img {
            width: 100%;
            height: 160px;
            object-fit: cover;
            border-radius: 4px;
        }
        pre {
            white-space: pre-wrap;
            word-wrap: break-word;
            background-color: #f8f9fa;
            padding: 1rem;
            border-radius: 4px;
            overflow-x: auto;
        }
        code {
            background-color: #f0f0f0;
            padding: 2px 4px;
            border-radius: 3px;
            font-family: monospace;
        }
        .note-info {
            margin-top: 1rem;
            padding-top: 1rem;
            border-top: 1px solid #eee;
            font-size: 0.9em;
            color: #666;
        }
        .tag {
            display: inline-block;
            background: #e9ecef;
            padding: 2px 8px;
            border-radius: 4px;
            margin-right: 4px;
            font-size: 0.8em;
        }
        .empty {
            color: #666;
            text-align: center;
        }
        .material-icons {
            font-size: 40px;
            color: #607d8b;
        }
        .file-meta {
            font-size: 0.85em;
            color: #666;
        }
        .actions a {
            margin-right: 0.75rem;
        }
"#;

/// Builds the HTML pages opened in the browser.
#[derive(Debug)]
pub struct HtmlPresenter {
    markdown: MarkdownConverter,
    base_url: String,
}

impl HtmlPresenter {
    pub fn new(base_url: &str) -> Self {
        Self {
            markdown: MarkdownConverter::new(base_url),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn page(&self, title: &str, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <link rel="stylesheet" href="https://fonts.googleapis.com/icon?family=Material+Icons">
    <style>{STYLE}</style>
</head>
<body>
    <h1>{title}</h1>
{body}
</body>
</html>"#,
            title = text(title),
        )
    }

    #[instrument(level = "debug", skip_all, fields(count = notes.len()))]
    pub fn notes_section(&self, notes: &[Note]) -> String {
        if notes.is_empty() {
            return empty("No notes found");
        }
        notes.iter().map(|note| self.note_card(note)).collect()
    }

    pub fn note_card(&self, note: &Note) -> String {
        let tags: String = note
            .tags
            .iter()
            .map(|t| format!(r#"<span class="tag">{}</span>"#, text(t)))
            .collect();
        format!(
            r#"    <div class="card note">
        <div class="note-body">{body}</div>
        <div class="note-info">
            <div>Note ID: {id}</div>
            <div>Created: {created}</div>
            <div class="tags">{tags}</div>
        </div>
    </div>
"#,
            body = self.markdown.to_html(&note.content),
            id = note.id,
            created = text(&note.created_at),
            tags = if tags.is_empty() { "No tags".to_string() } else { tags },
        )
    }

    pub fn images_section(&self, images: &[ImageEntry]) -> String {
        if images.is_empty() {
            return empty("No images found");
        }
        let cards: String = images
            .iter()
            .map(|image| {
                format!(
                    r#"        <div class="card image">
            <img src="{src}" alt="{alt}" onerror="this.onerror=null;this.src='{IMAGE_PLACEHOLDER}';">
            <div class="file-meta">{name}</div>
        </div>
"#,
                    src = attr(&format!("{}{IMAGE_PATH_SEGMENT}{}", self.base_url, image.filename)),
                    alt = attr(&image.filename),
                    name = text(&image.filename),
                )
            })
            .collect();
        grid(&cards)
    }

    pub fn files_section(&self, files: &[StoredFile]) -> String {
        if files.is_empty() {
            return empty("No files found");
        }
        let cards: String = files.iter().map(|file| self.file_card(file)).collect();
        grid(&cards)
    }

    fn file_card(&self, file: &StoredFile) -> String {
        let preview = file
            .kind
            .preview_label()
            .map(|label| {
                format!(
                    r#" <span class="tag" title="Preview file {}">{label}</span>"#,
                    file.id
                )
            })
            .unwrap_or_default();
        format!(
            r#"        <div class="card file">
            <span class="material-icons">{icon}</span>
            <div><strong>{name}</strong></div>
            <div class="file-meta">{size} · {kind} · id {id}</div>
            <div class="actions"><a href="{href}" download>Download</a>{preview}</div>
        </div>
"#,
            icon = file.kind.icon_name(),
            name = text(file.display_name()),
            size = format_file_size(file.size),
            kind = file.kind.as_str(),
            id = file.id,
            href = attr(&self.absolute(&file.download_path())),
        )
    }

    pub fn tags_section(&self, tags: &[Tag]) -> String {
        if tags.is_empty() {
            return empty("No tags found");
        }
        tags.iter()
            .map(|tag| {
                format!(
                    r#"    <div class="card tag-card"><span class="tag">{name}</span> {count} notes · id {id}</div>
"#,
                    name = text(&tag.name),
                    count = tag.note_count,
                    id = tag.id,
                )
            })
            .collect()
    }

    pub fn tag_notes_page(&self, tag_notes: &TagNotes) -> String {
        let title = format!("Tag {} ({} notes)", tag_notes.tag_name, tag_notes.total);
        self.page(&title, &self.notes_section(&tag_notes.notes))
    }

    pub fn note_page(&self, note: &Note) -> String {
        self.page(&format!("Note {}", note.id), &self.note_card(note))
    }

    pub fn preview_page(&self, preview: &MediaPreview) -> String {
        let src = attr(&self.absolute(&preview.path)).into_owned();
        let media = match preview.kind {
            FileKind::Video => format!(
                r#"<video src="{src}" controls autoplay style="max-width: 100%;"></video>"#
            ),
            _ => format!(
                r#"<img src="{src}" alt="{alt}" style="max-width: 100%;" onerror="this.onerror=null;this.src='{IMAGE_PLACEHOLDER}';">"#,
                alt = attr(&preview.title),
            ),
        };
        self.page(&preview.title, &format!("    <div class=\"card\">{media}</div>\n"))
    }

    pub fn error_card(&self, message: &str) -> String {
        format!(
            "    <div class=\"card error\">{}</div>\n",
            text(message)
        )
    }

    pub fn error_page(&self, title: &str, message: &str) -> String {
        self.page(title, &self.error_card(message))
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn empty(message: &str) -> String {
    format!("    <p class=\"empty\">{message}</p>\n")
}

fn grid(cards: &str) -> String {
    format!("    <div class=\"grid\">\n{cards}    </div>\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter() -> HtmlPresenter {
        HtmlPresenter::new("http://127.0.0.1:8000/")
    }

    fn note(id: i64, content: &str) -> Note {
        Note {
            id,
            content: content.to_string(),
            created_at: "2024-05-01T10:00:00".to_string(),
            tags: vec!["work".to_string()],
        }
    }

    #[test]
    fn given_no_notes_when_rendering_section_then_shows_message_and_zero_cards() {
        // Act
        let html = presenter().notes_section(&[]);

        // Assert
        assert!(html.contains("No notes found"));
        assert!(!html.contains("class=\"card"));
    }

    #[test]
    fn given_notes_when_rendering_section_then_one_card_per_note() {
        let html = presenter().notes_section(&[note(1, "# One"), note(2, "two")]);
        assert_eq!(html.matches("class=\"card note\"").count(), 2);
        assert!(html.contains("<h1>One</h1>"));
        assert!(html.contains(r#"<span class="tag">work</span>"#));
    }

    #[test]
    fn given_note_with_sized_image_when_rendering_then_image_is_normalized() {
        let html = presenter().note_card(&note(3, "![cat](cat.png =300x200)"));
        assert!(html.contains(r#"src="http://127.0.0.1:8000/images/get/cat.png""#));
        assert!(html.contains("width: 300px"));
    }

    #[test]
    fn given_no_images_when_rendering_section_then_shows_message() {
        let html = presenter().images_section(&[]);
        assert!(html.contains("No images found"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn given_image_entry_when_rendering_then_src_is_built_from_filename() {
        let images = [ImageEntry::new("/images/get/a.png", "a.png")];
        let html = presenter().images_section(&images);
        assert!(html.contains(r#"src="http://127.0.0.1:8000/images/get/a.png""#));
        assert!(html.contains("onerror="));
    }

    #[test]
    fn given_custom_base_when_rendering_images_then_ignores_server_url_element() {
        // Arrange
        let presenter = HtmlPresenter::new("https://notes.example.com");
        let images = [
            ImageEntry::new("http://127.0.0.1:8000/images/get/a.png", "a.png"),
            ImageEntry::new("", "b.png"),
        ];

        // Act
        let html = presenter.images_section(&images);

        // Assert
        assert!(html.contains(r#"src="https://notes.example.com/images/get/a.png""#));
        assert!(html.contains(r#"src="https://notes.example.com/images/get/b.png""#));
        assert!(!html.contains("127.0.0.1"));
    }

    #[test]
    fn given_no_tags_when_rendering_section_then_shows_message() {
        let html = presenter().tags_section(&[]);
        assert!(html.contains("No tags found"));
    }

    #[test]
    fn given_tags_when_rendering_section_then_one_card_per_tag_with_count() {
        // Arrange
        let tags = [
            Tag { id: 1, name: "work".to_string(), note_count: 3 },
            Tag { id: 2, name: "<home>".to_string(), note_count: 0 },
        ];

        // Act
        let html = presenter().tags_section(&tags);

        // Assert
        assert_eq!(html.matches("class=\"card tag-card\"").count(), 2);
        assert!(html.contains(r#"<span class="tag">work</span> 3 notes · id 1"#));
        assert!(html.contains("&lt;home&gt;"));
    }

    #[test]
    fn given_video_file_when_rendering_then_shows_icon_size_and_play_label() {
        // Arrange
        let file = StoredFile {
            id: 7,
            url: None,
            filename: "abc.mp4".to_string(),
            original_filename: "holiday.mp4".to_string(),
            size: 1536,
            kind: FileKind::Video,
            created_at: None,
        };

        // Act
        let html = presenter().files_section(&[file]);

        // Assert
        assert!(html.contains("video_library"));
        assert!(html.contains("holiday.mp4"));
        assert!(html.contains("1.5 KB"));
        assert!(html.contains("Play"));
        assert!(html.contains(r#"title="Preview file 7""#));
        assert!(html.contains(r#"href="http://127.0.0.1:8000/files/download/abc.mp4""#));
    }

    #[test]
    fn given_document_file_when_rendering_then_has_no_preview_label() {
        let file = StoredFile {
            id: 8,
            url: None,
            filename: "r.docx".to_string(),
            original_filename: String::new(),
            size: 10,
            kind: FileKind::Document,
            created_at: None,
        };
        let html = presenter().files_section(&[file]);
        assert!(html.contains("description"));
        assert!(!html.contains("Preview"));
        assert!(!html.contains("Play"));
    }

    #[test]
    fn given_video_preview_when_rendering_then_uses_video_controls() {
        let preview = MediaPreview {
            title: "clip.mp4".to_string(),
            kind: FileKind::Video,
            path: "/files/download/x.mp4".to_string(),
        };
        let html = presenter().preview_page(&preview);
        assert!(html.contains("<video"));
        assert!(html.contains("controls autoplay"));
    }

    #[test]
    fn given_error_message_when_rendering_then_escapes_and_tints() {
        let html = presenter().error_page("Notes", "HTTP error! status: 500 (<boom>)");
        assert!(html.contains("card error"));
        assert!(html.contains("&lt;boom&gt;"));
    }
}
