// src/cli/args.rs
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Server base URL (overrides the config file)
    #[arg(short = 'u', long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Markdown notes
    #[command(subcommand)]
    Notes(NotesCommand),

    /// Images referenced from notes
    #[command(subcommand)]
    Images(ImagesCommand),

    /// Uploaded files
    #[command(subcommand)]
    Files(FilesCommand),

    /// Note tags
    #[command(subcommand)]
    Tags(TagsCommand),

    /// Check that the server is up
    Health,
}

#[derive(Subcommand, Debug, Clone)]
pub enum NotesCommand {
    /// List notes, newest first
    List {
        /// Only notes carrying this tag
        #[arg(long, value_name = "TAG")]
        tag: Option<String>,

        #[arg(long, value_name = "N")]
        limit: Option<u32>,

        #[arg(long, value_name = "N")]
        offset: Option<u32>,

        /// Render the list as an HTML page
        #[arg(long)]
        html: bool,
    },

    /// Show a note in the browser
    Show {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Output note as JSON instead of opening in browser
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Create {
        #[command(flatten)]
        content: ContentSource,
    },

    /// Replace the content of a note
    Edit {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        #[command(flatten)]
        content: ContentSource,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },
}

/// Where new note content comes from; the editor is used when neither is given.
#[derive(ClapArgs, Debug, Clone, Default, PartialEq)]
pub struct ContentSource {
    /// Markdown text
    #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
    pub message: Option<String>,

    /// Read Markdown from a file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Tag to attach (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ImagesCommand {
    List {
        #[arg(long)]
        html: bool,
    },
    Upload {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    Delete {
        #[arg(value_name = "FILENAME")]
        filename: String,
    },
    /// Download an image
    Get {
        #[arg(value_name = "FILENAME")]
        filename: String,

        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum FilesCommand {
    List {
        #[arg(long)]
        html: bool,
    },
    Upload {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    Delete {
        #[arg(value_name = "FILE_ID")]
        file_id: i64,
    },
    Download {
        #[arg(value_name = "FILENAME")]
        filename: String,

        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Create a share link and copy it to the clipboard
    Share {
        #[arg(value_name = "FILE_ID")]
        file_id: i64,
    },
    /// Play a video or show an image in the browser
    Preview {
        #[arg(value_name = "FILE_ID")]
        file_id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagsCommand {
    List {
        /// Render the tags as an HTML page
        #[arg(long)]
        html: bool,
    },
    Search {
        #[arg(value_name = "QUERY")]
        query: String,

        #[arg(long)]
        html: bool,
    },
    Rename {
        #[arg(value_name = "TAG_ID")]
        tag_id: i64,

        #[arg(value_name = "NAME")]
        name: String,
    },
    Delete {
        #[arg(value_name = "TAG_ID")]
        tag_id: i64,
    },
    /// Notes carrying a tag
    Notes {
        #[arg(value_name = "TAG_ID")]
        tag_id: i64,

        #[arg(long)]
        html: bool,
    },
}
