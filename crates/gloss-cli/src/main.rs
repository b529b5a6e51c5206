//! # Gloss CLI
//!
//! Command-line interface for browsing and searching a folder of markdown
//! documents.
//!
//! ## Commands
//!
//! - `gloss tree [FOLDER]` - Print the document tree
//! - `gloss find <name>` - Find documents by filename
//! - `gloss search <text>` - Search document contents
//! - `gloss interactive [FOLDER]` - Search as you type
//! - `gloss config` - Show or create the configuration file
//!
//! ## Example Usage
//!
//! ```bash
//! # Show the tree two levels deep
//! gloss tree ~/notes --depth 2
//!
//! # Find lines mentioning "roadmap"
//! gloss search roadmap --root ~/notes
//!
//! # Interactive search, printing the chosen document on exit
//! gloss i ~/notes
//! ```

mod app;
mod commands;
mod tui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Gloss - Browse and search markdown folders
#[derive(Parser)]
#[command(name = "gloss")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document tree of a folder
    Tree {
        /// Folder to show (defaults to general.default_root)
        root: Option<PathBuf>,

        /// Directory levels to expand (overrides tree.expand_depth)
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Find documents whose filename contains a string
    Find {
        /// Part of the filename (case-insensitive)
        name: String,

        /// Folder to search (defaults to general.default_root)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Search the contents of every document in a folder
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Folder to search (defaults to general.default_root)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Maximum number of matches (overrides search.max_results)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Seconds to wait for the search to finish
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Start interactive search-as-you-type mode
    #[command(alias = "i")]
    Interactive {
        /// Folder to search (defaults to general.default_root)
        root: Option<PathBuf>,
    },

    /// Show the configuration, or write a default configuration file
    Config {
        /// Write the current settings to the configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => gloss_core::Config::load_from(path)?,
        None => gloss_core::Config::load()?,
    };

    // Setup logging. The TUI owns the terminal, so keep it quiet there
    // unless asked otherwise.
    let interactive = matches!(cli.command, Commands::Interactive { .. });
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 if interactive => "error",
            0 => config.general.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Execute command
    match cli.command {
        Commands::Tree { root, depth } => commands::tree::run(config, root, depth),
        Commands::Find { name, root, output } => commands::find::run(config, &name, root, output),
        Commands::Search {
            query,
            root,
            limit,
            timeout,
            output,
        } => commands::search::run(config, &query, root, limit, timeout, output),
        Commands::Interactive { root } => tui::run(config, root),
        Commands::Config { init } => commands::config::run(config, cli.config, init),
    }
}
