//! Resolved run configuration.
//!
//! Values arrive from CLI flags, which clap backs with environment
//! variables. A `.env` file in the working directory is loaded before
//! parsing so it can supply those variables.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::error::{Error, Result};

/// Default cap on generated tokens per summary.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Which summarization service to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// A local or remote Ollama server (`/api/chat`).
    Ollama,
    /// The Anthropic messages API.
    Anthropic,
}

/// How files are keyed in the summary map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryKey {
    /// Path relative to the project root, `/`-separated.
    #[default]
    RelativePath,
    /// Base file name only. Files sharing a name in different directories
    /// collide and the later one wins.
    Basename,
}

/// Settings for the file collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectConfig {
    /// Project root to walk.
    pub root: PathBuf,
    /// Exact file names to skip.
    pub blacklist: Vec<String>,
    /// Upper bound on the project context length in characters.
    pub max_context_chars: Option<usize>,
}

impl CollectConfig {
    /// Display name of the project: the last component of the absolute root.
    #[must_use]
    pub fn project_name(&self) -> String {
        let absolute = std::fs::canonicalize(&self.root)
            .or_else(|_| std::path::absolute(&self.root))
            .unwrap_or_else(|_| self.root.clone());
        absolute
            .file_name()
            .map_or_else(|| absolute.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Settings for building the live LLM client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// Service to use.
    pub provider: Provider,
    /// Base URL of the Ollama server.
    pub ollama_host: String,
    /// Anthropic API key; required for [`Provider::Anthropic`].
    pub anthropic_api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Settings for the summary requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    /// Model identifier passed verbatim to the service.
    pub model: String,
    /// Cap on generated tokens per summary.
    pub max_tokens: u32,
    /// Summary map keying.
    pub key: SummaryKey,
}

/// Checks that a model identifier is usable.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for an empty identifier or one containing whitespace.
pub fn validate_model(model: &str) -> Result<()> {
    if model.trim().is_empty() {
        return Err(Error::InvalidConfig("model identifier must not be empty".into()));
    }
    if model.chars().any(char::is_whitespace) {
        return Err(Error::InvalidConfig(format!(
            "model identifier {model:?} must not contain whitespace"
        )));
    }
    Ok(())
}

impl LlmConfig {
    /// Checks provider-specific requirements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the Anthropic provider has no key
    /// or the Ollama host is not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        match self.provider {
            Provider::Anthropic => {
                if self.anthropic_api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
                    return Err(Error::InvalidConfig(
                        "ANTHROPIC_API_KEY must be set for the anthropic provider".into(),
                    ));
                }
            }
            Provider::Ollama => {
                if !(self.ollama_host.starts_with("http://")
                    || self.ollama_host.starts_with("https://"))
                {
                    return Err(Error::InvalidConfig(format!(
                        "Ollama host {:?} must start with http:// or https://",
                        self.ollama_host
                    )));
                }
            }
        }
        Ok(())
    }
}
