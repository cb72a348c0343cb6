//! propsearch: property record lookup service & CLI
//!
//! Dual-mode application:
//! - Server Mode (default): HTTP API over the property CSV file
//! - CLI Mode: run a single lookup or search and print the result
//!
//! Implements two queries:
//! - `lookup(propertyId, registrationNumber)` - Exact match on both identifiers
//! - `search(propertyType, district, areaType, regDateFrom, regDateTo)` - Filter and rank

mod cache;
mod cli;
mod config;
mod error;
mod record;
mod search;
mod server;
mod state;
mod store;
mod tools;

#[cfg(test)]
mod tests_server;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ServeArgs};
use config::Config;
use error::AppError;
use state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let config = Config::from_env().with_data_file(cli.data);

    match cli.command {
        Some(Commands::Lookup(args)) => run_cli(execute_lookup_cli(config, args).await),
        Some(Commands::Search(args)) => run_cli(execute_search_cli(config, args).await),
        Some(Commands::Serve(args)) => run_server_mode(config, args).await,
        None => run_server_mode(config, ServeArgs::default()).await,
    }
}

/// Print CLI output, or exit with a code derived from the error
fn run_cli(result: Result<String>) -> Result<()> {
    match result {
        Ok(output) => {
            println!("{}", output.trim_end());
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Execute lookup command in CLI mode
async fn execute_lookup_cli(config: Config, args: cli::LookupArgs) -> Result<String> {
    let json = args.json;
    let state = AppState::new(config);
    let record = tools::lookup::execute_lookup(&state.store, args).await?;

    if json {
        Ok(serde_json::to_string_pretty(&record)?)
    } else {
        Ok(tools::format::format_record(&record))
    }
}

/// Execute search command in CLI mode
async fn execute_search_cli(config: Config, args: cli::SearchArgs) -> Result<String> {
    let json = args.json;
    let state = AppState::new(config);
    let records = tools::search::execute_search(&state.store, args).await?;

    if json {
        Ok(serde_json::to_string_pretty(&records)?)
    } else {
        Ok(tools::format::format_results(&records))
    }
}

/// Map AppError to exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(AppError::InvalidInput(_)) => 1, // Invalid arguments
        Some(AppError::NotFound(_)) => 3,
        Some(AppError::SourceUnavailable(_)) => 4, // Data file missing or unreadable
        _ => 5,                                     // Other application errors
    }
}

/// Run in server mode
async fn run_server_mode(config: Config, args: ServeArgs) -> Result<()> {
    let config = config
        .with_listen(args.host, args.port)
        .with_cache(args.cache);

    info!(
        "Starting propsearch server with data file {} (cache: {})",
        config.data_file.display(),
        config.cache
    );

    server::serve(AppState::new(config)).await
}
