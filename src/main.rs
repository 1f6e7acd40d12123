mod commands;
mod datetime;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use calgrid_core::config::CalGridConfig;
use calgrid_core::persistence::FileGateway;
use calgrid_core::store::EventStore;
use calgrid_core::Category;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Keep a conflict-free calendar of events on local disk")]
struct Cli {
    /// Store events in this directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month of events, grouped by day
    List {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Only events whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only events in this category
        #[arg(short, long)]
        category: Option<Category>,

        /// Print the matching events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new event
    Add(commands::add::AddArgs),
    /// Change fields of an existing event
    Edit(commands::edit::EditArgs),
    /// Move an event to another day or time, keeping its duration
    Move {
        /// Event id
        id: String,

        /// New day (YYYY-MM-DD, keeps the time of day) or date/time
        #[arg(long)]
        to: String,
    },
    /// Delete an event
    Delete {
        /// Event id
        id: String,
    },
    /// Show one event in full
    Show {
        /// Event id
        id: String,

        /// Print the event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show where things are stored, or change the saved settings
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = CalGridConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::Config(args) => {
            let config_path = CalGridConfig::config_path()?;
            commands::config::run(config, &config_path, args)
        }
        command => {
            let mut store = open_store(&config, cli.data_dir)?;
            run_event_command(&mut store, command, &config)
        }
    }
}

fn run_event_command(
    store: &mut EventStore<FileGateway>,
    command: Commands,
    config: &CalGridConfig,
) -> Result<()> {
    match command {
        Commands::List {
            month,
            search,
            category,
            json,
        } => commands::list::run(store, month.as_deref(), search, category, json),
        Commands::Add(args) => commands::add::run(store, args, config.default_category),
        Commands::Edit(args) => commands::edit::run(store, args),
        Commands::Move { id, to } => commands::reschedule::run(store, &id, &to),
        Commands::Delete { id } => commands::delete::run(store, &id),
        Commands::Show { id, json } => commands::show::run(store, &id, json),
        Commands::Config(args) => {
            commands::config::run(config.clone(), &CalGridConfig::config_path()?, args)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &CalGridConfig, data_dir: Option<PathBuf>) -> Result<EventStore<FileGateway>> {
    let gateway = match data_dir {
        Some(dir) => FileGateway::new(dir),
        None => config.gateway(),
    };

    // Save failures after this point are only logged
    std::fs::create_dir_all(gateway.dir())
        .with_context(|| format!("Failed to create {}", gateway.dir().display()))?;

    tracing::debug!(path = %gateway.path().display(), "opening event store");
    Ok(EventStore::open(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_data_dir_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let events_dir = dir.path().join("events");

        let store = open_store(&CalGridConfig::default(), Some(events_dir.clone())).unwrap();

        assert!(events_dir.is_dir());
        assert_eq!(store.gateway().path(), events_dir.join("calendarEvents.json"));
        assert!(store.events().is_empty());
    }
}
