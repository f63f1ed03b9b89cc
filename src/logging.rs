//! Logging configuration.
//!
//! Log settings are a plain value built from the command line. `main`
//! installs the subscriber from it once, and the collector and requester
//! receive a copy at construction to decide how chatty per-file events are.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Default filter directive when neither `--log-level` nor `TREESUM_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Explicit logging configuration threaded through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive, e.g. `"info"` or `"treesum=debug"`.
    pub filter: String,
    /// Emit one `info` event per file collected and summarized. When off,
    /// those events drop to `debug`; failures are always `warn`.
    pub per_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_string(), per_file: true }
    }
}

impl LogConfig {
    /// Validates the filter directive without installing anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.filter)
            .map_err(|e| Error::InvalidConfig(format!("bad log filter {:?}: {e}", self.filter)))
    }

    /// Installs a stderr `fmt` subscriber using this configuration.
    ///
    /// Installing twice is harmless: the second attempt is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the filter directive does not parse.
    pub fn init(&self) -> Result<()> {
        let filter = self.env_filter()?;
        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
        if installed.is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
        Ok(())
    }
}
