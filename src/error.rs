//! Fatal error type surfaced to the binary.
//!
//! Per-file problems never reach this type: the collector and requester
//! contain them and turn them into log events and placeholder values.

use std::path::PathBuf;

/// Boxed error returned across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Command-line parsing failed, or help/version was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),
    /// The project root could not be listed.
    #[error("cannot read project root {}: {source}", path.display())]
    RootUnreadable {
        /// The root that was requested.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: BoxError,
    },
    /// A configuration value is missing or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// A cassette recording session could not be created or written.
    #[error("recording failed: {0}")]
    Recording(String),
    /// Writing rendered output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
