//! Daybook CLI
//!
//! Command-line interface for Daybook - a personal journal with PDF
//! export.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use daybook_core::{Config, EntryStore, Mood};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Daybook - a personal journal with PDF export")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new journal entry
    Add {
        /// Entry title
        title: String,
        /// Mood tag (happy, sad, neutral, excited, angry)
        #[arg(short, long)]
        mood: Mood,
        /// Entry content; embedded newlines separate paragraphs
        #[arg(short, long)]
        content: String,
    },
    /// List entries, newest first, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Only entries whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only entries created on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show one entry in full
    Show {
        /// Entry id
        id: i64,
    },
    /// Edit an entry; omitted fields keep their current values
    Edit {
        /// Entry id
        id: i64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New mood tag
        #[arg(short, long)]
        mood: Option<Mood>,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Export an entry as a PDF document
    Export {
        /// Entry id
        id: i64,
        /// Directory to write the PDF into (defaults to the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List the available mood tags
    Moods,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, font_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Validation and not-found conditions are user-facing
            // messages, not program failures
            match e.downcast_ref::<daybook_core::Error>() {
                Some(core_err) if core_err.is_user_error() => eprintln!("{}", core_err),
                _ => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that don't need the store
    match &cli.command {
        Commands::Moods => return commands::entry::moods(&output),
        Commands::Config { command } => return handle_config_command(command.clone(), &output),
        _ => {}
    }

    let config = Config::load().context("Failed to load configuration")?;
    let store = EntryStore::open(&config).context("Failed to open journal store")?;

    match cli.command {
        Commands::Add {
            title,
            mood,
            content,
        } => commands::entry::add(&store, title, mood, content, &output),
        Commands::List { search, date } => commands::entry::list(&store, search, date, &output),
        Commands::Show { id } => commands::entry::show(&store, id, &output),
        Commands::Edit {
            id,
            title,
            mood,
            content,
        } => commands::entry::edit(&store, id, title, mood, content, &output),
        Commands::Delete { id, yes } => commands::entry::delete(&store, id, yes, &output),
        Commands::Export { id, out } => commands::export::export(&store, &config, id, out, &output),
        Commands::Moods | Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
