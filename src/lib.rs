//! Core library entry for the `treesum` CLI.
//!
//! `treesum` walks a project, asks a language model to summarize every file
//! in the context of the whole project, and prints the summaries as a tree
//! mirroring the directory layout.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod ports;
pub mod summary;

use clap::Parser;

pub use error::{Error, Result};

/// Run the CLI with the provided arguments.
///
/// A `.env` file in the working directory, if present, is loaded first so
/// its variables can back command-line options.
///
/// # Errors
///
/// Returns an error when argument parsing fails or command execution fails.
/// Help and version requests surface as [`Error::Usage`] and should be
/// printed as-is.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    // A missing .env is the common case.
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::try_parse_from(args)?;
    commands::dispatch(&cli)
}
