// src/ports/console.rs
use crate::domain::{ImageEntry, Note, StoredFile, Tag, TagNotes};
use crate::infrastructure::MarkdownConverter;
use crate::util::text::{extract_first_line, format_file_size};
use std::io::{self, Write};

/// Plain-text listings for the terminal.
#[derive(Debug)]
pub struct ConsolePresenter {
    markdown: MarkdownConverter,
}

impl ConsolePresenter {
    pub fn new(base_url: &str) -> Self {
        Self {
            markdown: MarkdownConverter::new(base_url),
        }
    }

    /// One line per note: id, first line of text, tags
    pub fn notes<W: Write>(&self, out: &mut W, notes: &[Note]) -> io::Result<()> {
        if notes.is_empty() {
            return writeln!(out, "No notes found");
        }
        for note in notes {
            let first_line = extract_first_line(&self.markdown.to_html(&note.content));
            if note.tags.is_empty() {
                writeln!(out, "{}\t{}", note.id, first_line)?;
            } else {
                writeln!(out, "{}\t{}\t[{}]", note.id, first_line, note.tags.join(", "))?;
            }
        }
        Ok(())
    }

    pub fn images<W: Write>(&self, out: &mut W, images: &[ImageEntry]) -> io::Result<()> {
        if images.is_empty() {
            return writeln!(out, "No images found");
        }
        for image in images {
            writeln!(out, "{}\t{}", image.filename, image.url)?;
        }
        Ok(())
    }

    pub fn files<W: Write>(&self, out: &mut W, files: &[StoredFile]) -> io::Result<()> {
        if files.is_empty() {
            return writeln!(out, "No files found");
        }
        for file in files {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                file.id,
                file.kind.as_str(),
                format_file_size(file.size),
                file.display_name()
            )?;
        }
        Ok(())
    }

    pub fn tags<W: Write>(&self, out: &mut W, tags: &[Tag]) -> io::Result<()> {
        if tags.is_empty() {
            return writeln!(out, "No tags found");
        }
        for tag in tags {
            writeln!(out, "{}\t{}\t{} notes", tag.id, tag.name, tag.note_count)?;
        }
        Ok(())
    }

    pub fn tag_notes<W: Write>(&self, out: &mut W, tag_notes: &TagNotes) -> io::Result<()> {
        writeln!(out, "Tag {} ({} notes)", tag_notes.tag_name, tag_notes.total)?;
        self.notes(out, &tag_notes.notes)
    }

    pub fn lines<W: Write>(&self, out: &mut W, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileKind;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&ConsolePresenter, &mut Vec<u8>) -> io::Result<()>,
    {
        let presenter = ConsolePresenter::new("http://127.0.0.1:8000");
        let mut out = Vec::new();
        f(&presenter, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn given_no_notes_when_listing_then_prints_not_found() {
        assert_eq!(render(|p, out| p.notes(out, &[])), "No notes found\n");
    }

    #[test]
    fn given_markdown_note_when_listing_then_prints_first_line_and_tags() {
        // Arrange
        let note = Note {
            id: 4,
            content: "# Groceries &amp; more\n\n- milk".to_string(),
            created_at: String::new(),
            tags: vec!["home".to_string(), "todo".to_string()],
        };

        // Act
        let output = render(|p, out| p.notes(out, &[note]));

        // Assert
        assert_eq!(output, "4\tGroceries & more\t[home, todo]\n");
    }

    #[test]
    fn given_files_when_listing_then_prints_kind_and_size() {
        let file = StoredFile {
            id: 2,
            url: None,
            filename: "x.pdf".to_string(),
            original_filename: "report.pdf".to_string(),
            size: 2048,
            kind: FileKind::Pdf,
            created_at: None,
        };
        let output = render(|p, out| p.files(out, &[file]));
        assert_eq!(output, "2\tpdf\t2.0 KB\treport.pdf\n");
    }

    #[test]
    fn given_no_tags_when_listing_then_prints_not_found() {
        assert_eq!(render(|p, out| p.tags(out, &[])), "No tags found\n");
    }
}
