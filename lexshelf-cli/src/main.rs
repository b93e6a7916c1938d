//! Lexshelf CLI - read and browse a legal-text library from the terminal

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lexshelf_core::{BookFilter, BookSort};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lexshelf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Library snapshot to read (defaults to the built-in demo catalog)
    #[arg(short, long, global = true, env = "LEXSHELF_LIBRARY")]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books in the library
    Books {
        /// Only books whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Which books to list (all, pinned, new)
        #[arg(short, long, default_value = "all")]
        filter: BookFilter,

        /// Sort order (title, recent, sections)
        #[arg(long, default_value = "title")]
        sort: BookSort,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a book and its sections
    Show {
        /// Book id
        book: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read a section with the saved reading preferences
    Read {
        /// Section id
        section: u64,

        /// Read the section after this one instead
        #[arg(long)]
        next: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List favorite sections
    Favorites {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tags, or the sections carrying one tag
    Tags {
        /// Tag id
        tag: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the notification feed
    Notifications {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the demo library to a snapshot file
    Init {
        /// Snapshot path
        path: PathBuf,

        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so JSON output stays clean
    let filter = if cli.verbose {
        "lexshelf_cli=debug,lexshelf_core=debug"
    } else {
        "lexshelf_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let library = cli.library.as_deref();

    match cli.command {
        Commands::Books {
            search,
            filter,
            sort,
            json,
        } => commands::books(library, search.as_deref(), filter, sort, json).await,

        Commands::Show { book, json } => commands::show(library, book, json).await,

        Commands::Read {
            section,
            next,
            json,
        } => commands::read(library, section, next, json).await,

        Commands::Favorites { json } => commands::favorites(library, json).await,

        Commands::Tags { tag, json } => commands::tags(library, tag, json).await,

        Commands::Notifications { json } => commands::notifications(library, json).await,

        Commands::Init { path, force } => commands::init(&path, force).await,
    }
}
