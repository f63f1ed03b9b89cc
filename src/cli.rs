//! CLI argument definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::adapters::live::llm::DEFAULT_OLLAMA_HOST;
use crate::config::{
    validate_model, CollectConfig, LlmConfig, Provider, RequestConfig, SummaryKey,
    DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT_SECS,
};
use crate::error::Result;
use crate::logging::{LogConfig, DEFAULT_LOG_FILTER};

/// Top-level CLI parser for `treesum`.
#[derive(Debug, Parser)]
#[command(name = "treesum", version, about = "Summarize every file of a project as a tree")]
pub struct Cli {
    /// Log filter directive (e.g. `info`, `treesum=debug`).
    #[arg(long, global = true, env = "TREESUM_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,

    /// Log per-file progress at debug level instead of info.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize each file with a language model and print the tree.
    Summarize(SummarizeArgs),
    /// Print the assembled project context without contacting a model.
    Context(CollectArgs),
}

/// Arguments shared by every command that walks a project.
#[derive(Debug, Clone, Args)]
pub struct CollectArgs {
    /// Path to the project directory.
    #[arg(long = "input-project", short = 'i', alias = "input_project", value_name = "DIR")]
    pub input_project: PathBuf,

    /// Exact file name to skip; repeat for more.
    #[arg(long = "exclude", short = 'x', value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Leave trailing files out of the shared context past this many characters.
    #[arg(long, env = "TREESUM_MAX_CONTEXT_CHARS", value_name = "N")]
    pub max_context_chars: Option<usize>,
}

/// Arguments for `treesum summarize`.
#[derive(Debug, Clone, Args)]
pub struct SummarizeArgs {
    /// Project selection.
    #[command(flatten)]
    pub collect: CollectArgs,

    /// Model identifier to summarize with.
    #[arg(long, short = 'm', env = "TREESUM_MODEL")]
    pub model: String,

    /// Summarization service.
    #[arg(long, value_enum, env = "TREESUM_PROVIDER", default_value_t = Provider::Ollama)]
    pub provider: Provider,

    /// Ollama server URL.
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_OLLAMA_HOST)]
    pub ollama_host: String,

    /// Anthropic API key.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// Maximum tokens generated per summary.
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Key summaries by file name only, as older versions did. Files that
    /// share a name in different directories overwrite each other.
    #[arg(long)]
    pub key_by_basename: bool,
}

impl Cli {
    /// Logging configuration requested on the command line.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig { filter: self.log_level.clone(), per_file: !self.quiet }
    }
}

impl CollectArgs {
    /// Collector settings.
    #[must_use]
    pub fn collect_config(&self) -> CollectConfig {
        CollectConfig {
            root: self.input_project.clone(),
            blacklist: self.exclude.clone(),
            max_context_chars: self.max_context_chars,
        }
    }
}

impl SummarizeArgs {
    /// Live LLM client settings.
    #[must_use]
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            provider: self.provider,
            ollama_host: self.ollama_host.clone(),
            anthropic_api_key: self.anthropic_api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Requester settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the model identifier is malformed.
    pub fn request_config(&self) -> Result<RequestConfig> {
        validate_model(&self.model)?;
        Ok(RequestConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            key: if self.key_by_basename { SummaryKey::Basename } else { SummaryKey::RelativePath },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::config::{Provider, SummaryKey};
    use clap::Parser;

    #[test]
    fn parses_summarize_subcommand() {
        let cli = Cli::parse_from([
            "treesum", "summarize", "-i", "proj", "-m", "llama3.2", "-x", "secrets.env", "-x",
            "Cargo.lock",
        ]);
        let Command::Summarize(args) = cli.command else { panic!("expected summarize") };
        assert_eq!(args.collect.input_project.to_str(), Some("proj"));
        assert_eq!(args.collect.exclude, vec!["secrets.env", "Cargo.lock"]);
        assert_eq!(args.model, "llama3.2");
        assert_eq!(args.request_config().unwrap().key, SummaryKey::RelativePath);
    }

    #[test]
    fn parses_provider_and_basename_flag() {
        let cli = Cli::parse_from([
            "treesum", "summarize", "-i", "p", "-m", "claude-sonnet-4-5", "--provider", "anthropic",
            "--key-by-basename",
        ]);
        let Command::Summarize(args) = cli.command else { panic!("expected summarize") };
        assert_eq!(args.provider, Provider::Anthropic);
        assert_eq!(args.request_config().unwrap().key, SummaryKey::Basename);
    }

    #[test]
    fn accepts_underscore_alias_for_input_project() {
        let cli = Cli::parse_from(["treesum", "context", "--input_project", "proj"]);
        let Command::Context(args) = cli.command else { panic!("expected context") };
        assert_eq!(args.input_project.to_str(), Some("proj"));
    }

    #[test]
    fn quiet_disables_per_file_info() {
        let cli = Cli::parse_from(["treesum", "-q", "context", "-i", "proj"]);
        assert!(!cli.log_config().per_file);
    }

    #[test]
    fn blank_model_is_rejected() {
        let cli = Cli::parse_from(["treesum", "summarize", "-i", "p", "-m", " "]);
        let Command::Summarize(args) = cli.command else { panic!("expected summarize") };
        assert!(args.request_config().is_err());
    }
}
