use clap::{Parser, Subcommand};
use daylog::model::Mood;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daylog")]
#[command(about = "Local-first daily journal with filters and one-step undo", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Store data in this directory instead of the platform data dir
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new entry
    #[command(alias = "a")]
    Add {
        /// Entry title (required)
        title: String,

        /// Entry body
        #[arg(required = false)]
        content: Option<String>,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Mood: happy, okay, down, anxious or tired
        #[arg(short, long)]
        mood: Option<Mood>,

        /// Tag the entry (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        /// Text search over title, content and tags
        #[arg(short, long)]
        query: Option<String>,

        /// Only entries on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Only entries with this mood
        #[arg(short, long)]
        mood: Option<Mood>,

        /// Require a tag (repeatable; all must match)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Reveal this many pages of results
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show one entry in full
    Show {
        /// Entry id
        id: String,
    },

    /// Edit an entry (unspecified fields are kept)
    #[command(alias = "e")]
    Edit {
        /// Entry id
        id: String,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(short, long)]
        mood: Option<Mood>,

        /// Replace the tag set (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry id
        id: String,
    },

    /// Undo the last mutation
    Undo,

    /// Redo the last undone mutation
    Redo,

    /// Import entries from a JSON array file
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Export all entries
    Export {
        /// CSV instead of JSON (attachment payloads excluded)
        #[arg(long)]
        csv: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List every tag in use
    Tags,

    /// Show the estimated storage footprint
    Size,
}
