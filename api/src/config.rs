//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible
//! defaults.

use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default upstream feed: the covidtracking.com per-state current
/// snapshot.
pub const DEFAULT_DATA_URL: &str = "https://api.covidtracking.com/v1/states/current.csv";

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `COVIDASH_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `COVIDASH_PORT`: The port to listen on (default: 8080)
/// - `COVIDASH_DATA_URL`: URL of the CSV feed to fetch at startup
///   (default: the covidtracking.com states/current export)
/// - `COVIDASH_DATA_FILE`: Optional local CSV file; when set, it is
///   loaded instead of fetching the URL (offline/dev mode)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// URL of the upstream CSV feed.
    pub data_url: String,
    /// Optional local CSV file, taking precedence over the URL.
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `COVIDASH_PORT` is set but cannot be parsed as
    /// a valid port number.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("COVIDASH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("COVIDASH_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()?
            .unwrap_or(8080);

        let data_url =
            std::env::var("COVIDASH_DATA_URL").unwrap_or_else(|_| DEFAULT_DATA_URL.to_string());

        let data_file = std::env::var("COVIDASH_DATA_FILE").ok().map(PathBuf::from);

        Ok(Self {
            host,
            port,
            data_url,
            data_file,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Panics
    ///
    /// Panics if the host and port combination cannot be parsed as a
    /// valid socket address.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address from config")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_url: DEFAULT_DATA_URL.to_string(),
            data_file: None,
        }
    }
}
