//! Runtime configuration
//!
//! Resolved from environment variables with defaults, then overridden by
//! whatever flags the command line carried.

use std::env;
use std::fmt::{self, Display};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, warn};

pub const DEFAULT_DATA_FILE: &str = "indian_property_data_with_status.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

const DATA_FILE_VAR: &str = "PROPERTY_DATA_FILE";
const HOST_VAR: &str = "PROPERTY_HOST";
const PORT_VAR: &str = "PORT";
const CACHE_VAR: &str = "PROPERTY_CACHE";

/// Whether parsed records are kept between queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CacheMode {
    /// Re-read the file on every query
    #[default]
    Off,
    /// Keep records until the file's mtime or size changes
    Mtime,
}

impl FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "" => Ok(CacheMode::Off),
            "mtime" => Ok(CacheMode::Mtime),
            other => Err(format!("unknown cache mode '{}'", other)),
        }
    }
}

impl Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheMode::Off => write!(f, "off"),
            CacheMode::Mtime => write!(f, "mtime"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub cache: CacheMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cache: CacheMode::Off,
        }
    }
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` as the variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            data_file: PathBuf::from(try_load(
                &lookup,
                DATA_FILE_VAR,
                DEFAULT_DATA_FILE.to_string(),
            )),
            host: try_load(&lookup, HOST_VAR, defaults.host),
            port: try_load(&lookup, PORT_VAR, defaults.port),
            cache: try_load(&lookup, CACHE_VAR, defaults.cache),
        }
    }

    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }

    pub fn with_listen(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn with_cache(mut self, cache: Option<CacheMode>) -> Self {
        if let Some(cache) = cache {
            self.cache = cache;
        }
        self
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        debug!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value '{raw}': {e}; using default: {default}");
        default
    })
}
