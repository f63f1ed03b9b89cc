//! `treesum context` command.

use std::io::{self, Write};

use crate::cli::CollectArgs;
use crate::config::CollectConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::logging::LogConfig;
use crate::summary::Collector;

/// Execute the `context` command: print the project context that
/// `summarize` would send with every request.
///
/// # Errors
///
/// Returns an error if the project root cannot be read or stdout fails.
pub fn run(args: &CollectArgs, log: &LogConfig) -> Result<()> {
    let ctx = ServiceContext::offline();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_context(&ctx, &args.collect_config(), log, &mut out)
}

/// Collect and print the context using the given service context.
fn run_with_context<W: Write>(
    ctx: &ServiceContext,
    config: &CollectConfig,
    log: &LogConfig,
    out: &mut W,
) -> Result<()> {
    let collection = Collector::new(ctx.fs.as_ref(), config, log).collect(&config.root)?;
    if collection.is_empty() {
        writeln!(out, "No files found in the project.")?;
        return Ok(());
    }
    writeln!(out, "{}", collection.context)?;
    Ok(())
}
