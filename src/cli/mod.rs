//! CLI module for Ertflix
//!
//! Browses the same catalog as the window, printing to the terminal.

mod commands;
mod output;
pub mod shell;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::context::AppContext;
use crate::models::Genre;

pub use output::OutputFormat;

/// Ertflix - TV show catalog browser
#[derive(Parser, Debug)]
#[command(name = "ertflix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Without a subcommand the desktop window opens
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the catalog grouped by genre
    Home {
        /// Only print this genre (drama, thriller, science-fiction, comedy, action)
        #[arg(short, long)]
        genre: Option<Genre>,

        /// Shows per genre
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show details for one show
    Show {
        /// Show id
        id: u64,
    },

    /// Search the catalog
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Open a route path such as /details/1 or /search?q=dome
    Open {
        /// Route path
        path: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Interactive shell
    Shell,
}

/// Run one command against an existing context. The shell itself is started
/// by [`run`], never from inside a session.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match command {
        Commands::Home { genre, limit } => commands::home::run(ctx, genre, limit, format).await,
        Commands::Show { id } => commands::show::run(ctx, id, format).await,
        Commands::Search { query } => commands::search::run(ctx, &query.join(" "), format).await,
        Commands::Open { path } => commands::open::run(ctx, &path, format, quiet).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
        Commands::Shell => anyhow::bail!("Already in shell mode"),
    }
}

/// Run the CLI with parsed arguments
pub async fn run(command: Commands, output: &OutputOptions) -> anyhow::Result<()> {
    let config = Config::load()?;
    let ctx = AppContext::from_config(&config)?;

    if let Commands::Shell = command {
        return shell::run(&ctx).await;
    }
    dispatch(command, &ctx, output.format(), output.quiet).await
}
