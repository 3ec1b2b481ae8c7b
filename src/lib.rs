// src/lib.rs
pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::application::{
    Confirm, FileLibrary, FileSharer, ImageLibrary, NoteEditor, NoteLister, Removal, Remover,
    TagManager,
};
use crate::cli::args::{
    Args, Command, ContentSource, FilesCommand, ImagesCommand, NotesCommand, TagsCommand,
};
use crate::config::Config;
use crate::domain::{DomainError, NoteDraft, NoteQuery};
use crate::infrastructure::{
    AssumeYes, ContentRenderer, ExternalEditor, HttpApi, StdinConfirm, SystemClipboard,
};
use crate::ports::{ConsolePresenter, HtmlPresenter};
use anyhow::{Context, Result};
use std::io::{self, Stdout};
use tracing::{debug, info};
use url::Url;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notedesk with arguments");

    let config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    let base = config.base_url(args.base_url.as_deref())?;
    let share_origin = config.share_origin(&base)?;
    info!(%base, "Using server");

    let api = HttpApi::new(base.clone(), config.timeout())?;
    let renderer = if config.output.open_browser {
        ContentRenderer::new()
    } else {
        ContentRenderer::keeping_files()
    };

    let mut desk = Desk {
        api,
        html: HtmlPresenter::new(base.as_str()),
        console: ConsolePresenter::new(base.as_str()),
        renderer,
        open_browser: config.output.open_browser,
        share_origin,
        out: io::stdout(),
    };

    let mut stdin_confirm = StdinConfirm;
    let mut assume_yes = AssumeYes;
    let confirm: &mut dyn Confirm = if args.yes {
        &mut assume_yes
    } else {
        &mut stdin_confirm
    };

    match args.command {
        Command::Notes(command) => desk.notes(command, confirm),
        Command::Images(command) => desk.images(command, confirm),
        Command::Files(command) => desk.files(command, confirm),
        Command::Tags(command) => desk.tags(command, confirm),
        Command::Health => desk.health(),
    }
}

/// Everything a single command needs.
struct Desk {
    api: HttpApi,
    html: HtmlPresenter,
    console: ConsolePresenter,
    renderer: ContentRenderer,
    open_browser: bool,
    share_origin: Url,
    out: Stdout,
}

impl Desk {
    fn notes(&mut self, command: NotesCommand, confirm: &mut dyn Confirm) -> Result<()> {
        match command {
            NotesCommand::List {
                tag,
                limit,
                offset,
                html,
            } => {
                let query = NoteQuery { tag, limit, offset };
                let notes = NoteLister::new(&mut self.api).list_notes(&query);
                if html {
                    let notes = self.html_or_error_page("Notes", "notes.html", notes)?;
                    let page = self.html.page("Notes", &self.html.notes_section(&notes));
                    self.show_page("notes.html", &page)
                } else {
                    let notes = notes.context("Failed to load notes")?;
                    Ok(self.console.notes(&mut self.out, &notes)?)
                }
            }
            NotesCommand::Show { note_id, json } => {
                let note = NoteLister::new(&mut self.api)
                    .view_note(note_id)
                    .context("Failed to load note")?;
                debug!(?note, "Retrieved note");
                if json {
                    println!("{}", serde_json::to_string_pretty(&note)?);
                    Ok(())
                } else {
                    let page = self.html.note_page(&note);
                    self.show_page("note.html", &page)
                }
            }
            NotesCommand::Create { content } => {
                let draft = read_draft(&content, "")?;
                let mut editor = NoteEditor::new(&mut self.api);
                editor.open_for_create();
                let saved = editor.save(draft).context("Save failed")?;
                self.console.lines(&mut self.out, &saved.summary())?;
                self.refresh_notes()
            }
            NotesCommand::Edit { note_id, content } => {
                let mut editor = NoteEditor::new(&mut self.api);
                let note = editor
                    .open_for_edit(note_id)
                    .context("Failed to load note")?;
                let draft = match read_draft(&content, &note.content) {
                    Ok(draft) => draft,
                    Err(e) => {
                        editor.cancel();
                        return Err(e);
                    }
                };
                let saved = editor.save(draft).context("Save failed")?;
                self.console.lines(&mut self.out, &saved.summary())?;
                self.refresh_notes()
            }
            NotesCommand::Delete { note_id } => {
                let removal = Remover::new(&mut self.api, confirm)
                    .delete_note(note_id)
                    .context("Delete failed")?;
                if report_removal(removal) {
                    self.refresh_notes()?;
                }
                Ok(())
            }
        }
    }

    fn images(&mut self, command: ImagesCommand, confirm: &mut dyn Confirm) -> Result<()> {
        match command {
            ImagesCommand::List { html } => {
                let images = ImageLibrary::new(&mut self.api).list_images();
                if html {
                    let images = self.html_or_error_page("Images", "images.html", images)?;
                    let page = self.html.page("Images", &self.html.images_section(&images));
                    self.show_page("images.html", &page)
                } else {
                    let images = images.context("Failed to load images")?;
                    Ok(self.console.images(&mut self.out, &images)?)
                }
            }
            ImagesCommand::Upload { path } => {
                let url = ImageLibrary::new(&mut self.api)
                    .upload(&path)
                    .context("Upload failed")?;
                println!("Image uploaded: {url}");
                Ok(())
            }
            ImagesCommand::Delete { filename } => {
                let removal = Remover::new(&mut self.api, confirm)
                    .delete_image(&filename)
                    .context("Delete failed")?;
                if report_removal(removal) {
                    let images = ImageLibrary::new(&mut self.api).list_images()?;
                    self.console.images(&mut self.out, &images)?;
                }
                Ok(())
            }
            ImagesCommand::Get { filename, output } => {
                let path = ImageLibrary::new(&mut self.api)
                    .download(&filename, output.as_deref())
                    .context("Download failed")?;
                println!("Saved {}", path.display());
                Ok(())
            }
        }
    }

    fn files(&mut self, command: FilesCommand, confirm: &mut dyn Confirm) -> Result<()> {
        match command {
            FilesCommand::List { html } => {
                let files = FileLibrary::new(&mut self.api).list_files();
                if html {
                    let files = self.html_or_error_page("Files", "files.html", files)?;
                    let page = self.html.page("Files", &self.html.files_section(&files));
                    self.show_page("files.html", &page)
                } else {
                    let files = files.context("Failed to load files")?;
                    Ok(self.console.files(&mut self.out, &files)?)
                }
            }
            FilesCommand::Upload { path } => {
                let receipt = FileLibrary::new(&mut self.api)
                    .upload(&path)
                    .context("Upload failed")?;
                let name = if receipt.original_filename.is_empty() {
                    &receipt.filename
                } else {
                    &receipt.original_filename
                };
                println!("File uploaded: {name}");
                self.refresh_files()
            }
            FilesCommand::Delete { file_id } => {
                let removal = Remover::new(&mut self.api, confirm)
                    .delete_file(file_id)
                    .context("Delete failed")?;
                if report_removal(removal) {
                    self.refresh_files()?;
                }
                Ok(())
            }
            FilesCommand::Download { filename, output } => {
                let path = FileLibrary::new(&mut self.api)
                    .download(&filename, output.as_deref())
                    .context("Download failed")?;
                println!("Saved {}", path.display());
                Ok(())
            }
            FilesCommand::Share { file_id } => {
                let link = FileSharer::new(
                    &mut self.api,
                    SystemClipboard::new(),
                    self.share_origin.clone(),
                )
                .share(file_id)
                .context("Share failed")?;
                if link.copied {
                    println!("Share link copied to clipboard:\n{}", link.url);
                } else {
                    println!("Share link (copy it manually):\n{}", link.url);
                }
                Ok(())
            }
            FilesCommand::Preview { file_id } => {
                let preview = FileLibrary::new(&mut self.api)
                    .preview(file_id)
                    .context("Preview failed")?;
                let page = self.html.preview_page(&preview);
                self.show_page("preview.html", &page)
            }
        }
    }

    fn tags(&mut self, command: TagsCommand, confirm: &mut dyn Confirm) -> Result<()> {
        match command {
            TagsCommand::List { html } => {
                let tags = TagManager::new(&mut self.api).list_tags();
                if html {
                    let tags = self.html_or_error_page("Tags", "tags.html", tags)?;
                    let page = self.html.page("Tags", &self.html.tags_section(&tags));
                    self.show_page("tags.html", &page)
                } else {
                    let tags = tags.context("Failed to load tags")?;
                    Ok(self.console.tags(&mut self.out, &tags)?)
                }
            }
            TagsCommand::Search { query, html } => {
                let tags = TagManager::new(&mut self.api).search_tags(&query);
                if html {
                    let tags = self.html_or_error_page("Tags", "tags.html", tags)?;
                    let title = format!("Tags matching {query}");
                    let page = self.html.page(&title, &self.html.tags_section(&tags));
                    self.show_page("tags.html", &page)
                } else {
                    let tags = tags.context("Search failed")?;
                    Ok(self.console.tags(&mut self.out, &tags)?)
                }
            }
            TagsCommand::Rename { tag_id, name } => {
                let message = TagManager::new(&mut self.api)
                    .rename_tag(tag_id, &name)
                    .context("Rename failed")?;
                println!("{message}");
                Ok(())
            }
            TagsCommand::Delete { tag_id } => {
                let removal = Remover::new(&mut self.api, confirm)
                    .delete_tag(tag_id)
                    .context("Delete failed")?;
                if report_removal(removal) {
                    let tags = TagManager::new(&mut self.api).list_tags()?;
                    self.console.tags(&mut self.out, &tags)?;
                }
                Ok(())
            }
            TagsCommand::Notes { tag_id, html } => {
                let tag_notes = TagManager::new(&mut self.api).notes_for_tag(tag_id);
                if html {
                    let tag_notes = self.html_or_error_page("Tag", "tag.html", tag_notes)?;
                    let page = self.html.tag_notes_page(&tag_notes);
                    self.show_page("tag.html", &page)
                } else {
                    let tag_notes = tag_notes.context("Failed to load tag notes")?;
                    Ok(self.console.tag_notes(&mut self.out, &tag_notes)?)
                }
            }
        }
    }

    fn health(&mut self) -> Result<()> {
        let health = self.api.health().context("Health check failed")?;
        println!("{} {}", health.status, health.version);
        Ok(())
    }

    fn refresh_notes(&mut self) -> Result<()> {
        let notes = NoteLister::new(&mut self.api)
            .list_notes(&NoteQuery::default())
            .context("Failed to refresh notes")?;
        Ok(self.console.notes(&mut self.out, &notes)?)
    }

    fn refresh_files(&mut self) -> Result<()> {
        let files = FileLibrary::new(&mut self.api)
            .list_files()
            .context("Failed to refresh files")?;
        Ok(self.console.files(&mut self.out, &files)?)
    }

    /// On failure the error is also rendered as a page before it is returned.
    fn html_or_error_page<T>(
        &mut self,
        title: &str,
        name: &str,
        fetched: Result<T, DomainError>,
    ) -> Result<T> {
        match fetched {
            Ok(value) => Ok(value),
            Err(e) => {
                let action = format!("Failed to load {}", title.to_lowercase());
                let page = self.html.error_page(title, &format!("{action}: {e}"));
                self.show_page(name, &page)?;
                Err(anyhow::Error::new(e).context(action))
            }
        }
    }

    fn show_page(&mut self, name: &str, html: &str) -> Result<()> {
        let path = self.renderer.create_temp_file(name, html)?;
        if self.open_browser {
            self.renderer
                .open_in_browser(&path)
                .context("Failed to open browser")?;
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}

/// Prints the outcome; true when something was actually deleted
fn report_removal(removal: Removal) -> bool {
    match removal {
        Removal::Declined => {
            println!("Cancelled");
            false
        }
        Removal::Removed(message) => {
            println!("{message}");
            true
        }
    }
}

/// Note content from `-m`, `-f` or, failing both, the external editor.
fn read_draft(source: &ContentSource, initial: &str) -> Result<NoteDraft> {
    let content = match (&source.message, &source.file) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => ExternalEditor::from_env()
            .edit(initial)
            .context("Editor failed")?,
    };
    let draft = NoteDraft::new(content);
    Ok(if source.tags.is_empty() {
        draft
    } else {
        draft.with_tags(source.tags.clone())
    })
}
