//! CLI mode implementation
//!
//! The lookup and search argument structs double as the HTTP query-string
//! types, so both surfaces accept exactly the same parameters.

use crate::config::CacheMode;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

/// Property record lookup CLI
#[derive(Parser)]
#[command(name = "propsearch")]
#[command(about = "Property record lookup service and CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Property data CSV file (env PROPERTY_DATA_FILE)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the lookup API over HTTP (default)
    Serve(ServeArgs),
    /// Find one property by property and registration number
    Lookup(LookupArgs),
    /// Filter and rank properties by criteria
    Search(SearchArgs),
}

/// Serve command arguments
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Address to bind (env PROPERTY_HOST, default 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (env PORT, default 5000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Keep parsed records between queries (env PROPERTY_CACHE)
    #[arg(long, value_enum)]
    pub cache: Option<CacheMode>,
}

/// Exact lookup arguments
#[derive(Args, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LookupArgs {
    /// Property number, e.g. PROP123456 (case-insensitive)
    #[arg(short = 'p', long, required = true)]
    pub property_id: Option<String>,

    /// Registration number, e.g. REG123456789 (case-insensitive)
    #[arg(short = 'r', long, required = true)]
    pub registration_number: Option<String>,

    /// Print JSON instead of markdown
    #[arg(long)]
    #[serde(skip)]
    pub json: bool,
}

/// Advanced search arguments
#[derive(Args, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    /// Property type, e.g. Residential
    #[arg(short = 't', long)]
    pub property_type: Option<String>,

    /// District, e.g. Mumbai
    #[arg(short = 'D', long)]
    pub district: Option<String>,

    /// Area type: urban, rural or both
    #[arg(short = 'a', long)]
    pub area_type: Option<String>,

    /// Registered on or after this month (YYYY-MM)
    #[arg(long = "from")]
    pub reg_date_from: Option<String>,

    /// Registered on or before this month (YYYY-MM)
    #[arg(long = "to")]
    pub reg_date_to: Option<String>,

    /// Print JSON instead of markdown
    #[arg(long)]
    #[serde(skip)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_args() {
        let cli = Cli::parse_from([
            "propsearch",
            "lookup",
            "-p",
            "PROP123456",
            "-r",
            "REG123456789",
            "--json",
        ]);
        match cli.command {
            Some(Commands::Lookup(args)) => {
                assert_eq!(args.property_id.as_deref(), Some("PROP123456"));
                assert_eq!(args.registration_number.as_deref(), Some("REG123456789"));
                assert!(args.json);
            }
            _ => panic!("expected lookup command"),
        }
    }

    #[test]
    fn test_lookup_requires_both_identifiers() {
        assert!(Cli::try_parse_from(["propsearch", "lookup", "-p", "PROP1"]).is_err());
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::parse_from([
            "propsearch",
            "--data",
            "records.csv",
            "search",
            "--district",
            "Mumbai",
            "--from",
            "2025-01",
            "--to",
            "2025-06",
        ]);
        assert_eq!(cli.data, Some(PathBuf::from("records.csv")));
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.district.as_deref(), Some("Mumbai"));
                assert_eq!(args.reg_date_from.as_deref(), Some("2025-01"));
                assert_eq!(args.reg_date_to.as_deref(), Some("2025-06"));
                assert_eq!(args.area_type, None);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::parse_from(["propsearch", "serve", "--port", "8080", "--cache", "mtime"]);
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.cache, Some(CacheMode::Mtime));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["propsearch", "-v"]);
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn test_search_args_from_query_names() {
        let args: SearchArgs = serde_json::from_value(serde_json::json!({
            "propertyType": "Residential",
            "areaType": "urban",
            "regDateFrom": "2025-01",
        }))
        .unwrap();
        assert_eq!(args.property_type.as_deref(), Some("Residential"));
        assert_eq!(args.area_type.as_deref(), Some("urban"));
        assert_eq!(args.reg_date_from.as_deref(), Some("2025-01"));
        assert!(!args.json);
    }
}
