//! Coursemap CLI - Command-line interface for course prerequisite roadmaps.

use clap::Parser;
use coursemap_cli::commands;
use coursemap_cli::{Cli, Command, Config, Formatter};
use coursemap_engine::CancellationToken;
use coursemap_store::SqliteStore;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> coursemap_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(cli.verbose))
        .init();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let database = cli.database.unwrap_or_else(|| config.database.clone());

    // Ctrl-C stops a closure build between batches
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    match cli.command {
        Command::Import(args) => {
            commands::execute_import(args, &mut open_store(&database)?, &formatter)?;
        }
        Command::Show(args) => {
            commands::execute_show(args, &open_store(&database)?, &formatter)?;
        }
        Command::Search(args) => {
            commands::execute_search(args, &open_store(&database)?, &formatter)?;
        }
        Command::List(args) => {
            commands::execute_list(args, &open_store(&database)?, &formatter)?;
        }
        Command::Programs(args) => {
            commands::execute_programs(args, &open_store(&database)?, &formatter)?;
        }
        Command::Closure(args) => {
            commands::execute_closure(args, &open_store(&database)?, &cancel, &formatter).await?;
        }
        Command::Roadmap(args) => {
            commands::execute_roadmap(args, &open_store(&database)?, &cancel, &formatter).await?;
        }
        Command::Pass(args) => {
            commands::execute_pass(args, &mut open_store(&database)?, &cancel, &formatter).await?;
        }
        Command::Status(args) => {
            commands::execute_status(args, &mut open_store(&database)?, &formatter)?;
        }
        Command::Missing(args) => {
            commands::execute_missing(args, &open_store(&database)?, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}

/// Open the catalog database, creating its directory on first use.
fn open_store(database: &Path) -> coursemap_cli::Result<SqliteStore> {
    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    tracing::debug!("Using database {}", database.display());
    Ok(SqliteStore::new(database)?)
}

/// `RUST_LOG` wins when no `-v` flag is given
fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    }
}
