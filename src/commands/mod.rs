//! Command dispatch and handlers.

pub mod context;
pub mod summarize;

use crate::cli::{Cli, Command};
use crate::error::Result;

/// Dispatch a parsed command line to its handler.
///
/// Installs the tracing subscriber from the command line's log settings
/// before running.
///
/// # Errors
///
/// Returns an error if the log filter is malformed or the command fails.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let log = cli.log_config();
    log.init()?;

    match &cli.command {
        Command::Summarize(args) => summarize::run(args, &log),
        Command::Context(args) => context::run(args, &log),
    }
}
