//! roomsearch CLI - search a room's catalogue from the terminal
//!
//! `search` runs one query; `watch` turns stdin into a live search box.

mod cli;
mod commands;
mod config_profiles;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::search::run_search;
use crate::commands::watch::run_watch;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "roomsearch=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Search { query, page } => run_search(&query, &page, profile).await?,
        Commands::Watch { page } => run_watch(&page, profile).await?,
        Commands::Config { command } => run_config(command, profile)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
