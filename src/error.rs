use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors which stop the whole run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input file could not be opened.
    #[error("Failed to open `{}`", path.display())]
    Open {
        /// Path to the input file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// Reading the input failed part way through.
    #[error("Failed to read input")]
    Read(#[source] io::Error),
    /// The configured API base is not a usable URL.
    #[error("Invalid API url")]
    Url(#[from] url::ParseError),
    /// The outbound request could not be constructed.
    #[error("Failed to build request")]
    Request(#[source] reqwest::Error),
    /// The search call failed at the transport level.
    #[error("Search request for `{location}` failed")]
    Search {
        /// The location being searched.
        location: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },
    /// The search endpoint answered with a non-success status.
    #[error("Search request for `{location}` returned {status}")]
    SearchStatus {
        /// The location being searched.
        location: String,
        /// The returned status.
        status: StatusCode,
    },
}

/// A failed check-in. Only affects the venue it concerns.
#[derive(Debug, Error)]
pub enum CheckinError {
    /// The call did not complete.
    #[error("Check-in request failed")]
    Transport(#[source] reqwest::Error),
    /// The call completed with something other than 200 OK.
    #[error("Check-in returned {status}: {body}")]
    Status {
        /// The returned status.
        status: StatusCode,
        /// The response body, for diagnostics.
        body: String,
    },
}
