use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::client::{Client, Endpoints, DEFAULT_BASE, DEFAULT_LIMIT, DEFAULT_VERSION};
use crate::error::Error;

/// Search venues near every location in a file and check in to them.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// File with one location per line.
    #[arg(default_value = "./geos/xaa.txt")]
    pub input: PathBuf,

    /// OAuth token used for every API call.
    #[arg(long, env = "FOURSQUARE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Calls per hour, shared between searches and check-ins.
    #[arg(long, default_value_t = 475, value_parser = clap::value_parser!(u32).range(1..))]
    pub rate: u32,

    /// Stop after this many successful check-ins.
    #[arg(long, default_value_t = 90)]
    pub ceiling: usize,

    /// API version sent with every call.
    #[arg(long, default_value = DEFAULT_VERSION)]
    pub api_version: String,

    /// Venues requested per search.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Base url of the API.
    #[arg(long, default_value = DEFAULT_BASE)]
    pub base_url: String,

    /// Timeout in seconds for every single HTTP call.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

impl Config {
    /// The API endpoints described by this configuration.
    pub fn endpoints(&self) -> Result<Endpoints, Error> {
        Ok(Endpoints::new(&self.base_url, self.token.clone())?
            .with_version(self.api_version.clone())
            .with_limit(self.limit))
    }

    /// Construct the HTTP client described by this configuration.
    pub fn client(&self) -> Result<Client, Error> {
        Client::new(self.endpoints()?, Duration::from_secs(self.timeout))
    }
}
