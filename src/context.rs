//! Service context bundling the port trait objects.

use std::path::Path;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::llm::{AnthropicLlmClient, OllamaLlmClient};
use crate::adapters::recording::{RecordingFileSystem, RecordingLlmClient};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingLlmClient};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::{LlmConfig, Provider};
use crate::error::{Error, Result};
use crate::ports::filesystem::{DirEntry, FileSystem};
use crate::ports::llm::{CompletionFuture, CompletionRequest, LlmClient};

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// replaying, recording).
pub struct ServiceContext {
    /// Filesystem for project traversal.
    pub fs: Box<dyn FileSystem>,
    /// LLM client for summaries.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, llm: Box<dyn LlmClient>) -> Self {
        Self { fs, llm }
    }

    /// Creates a live context: real disk and the configured LLM service.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn live(llm: &LlmConfig) -> Result<Self> {
        Ok(Self { fs: Box::new(LiveFileSystem), llm: live_llm(llm)? })
    }

    /// Creates a context for commands that never call the model.
    #[must_use]
    pub fn offline() -> Self {
        Self { fs: Box::new(LiveFileSystem), llm: Box::new(PanickingLlmClient) }
    }

    /// Creates a live context whose port calls are recorded under `base`.
    ///
    /// The returned session must be finished after this context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context or the session cannot be created.
    pub fn recording_at(
        base: &Path,
        project: &str,
        llm: &LlmConfig,
    ) -> Result<(Self, RecordingSession)> {
        let inner_llm = live_llm(llm)?;
        let session = RecordingSession::new(base, project).map_err(Error::Recording)?;
        let ctx = Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), session.fs.clone())),
            llm: Box::new(RecordingLlmClient::new(inner_llm, session.llm.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette file.
    ///
    /// Each port gets its own replayer so per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = CassetteConfig::load_cassette(path)?;
        Ok(Self {
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            llm: Box::new(ReplayingLlmClient::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette panic with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            llm: match replayers.llm {
                Some(r) => Box::new(ReplayingLlmClient::new(r)),
                None => Box::new(PanickingLlmClient),
            },
        })
    }
}

fn live_llm(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    config.validate()?;
    let client: Box<dyn LlmClient> = match config.provider {
        Provider::Ollama => Box::new(OllamaLlmClient::new(&config.ollama_host, config.timeout)?),
        Provider::Anthropic => {
            let key = config.anthropic_api_key.clone().unwrap_or_default();
            Box::new(AnthropicLlmClient::new(key, config.timeout)?)
        }
    };
    tracing::debug!(provider = ?config.provider, "live LLM client ready");
    Ok(client)
}

// --- Panicking adapters for unconfigured ports ---

struct PanickingFileSystem;

impl FileSystem for PanickingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }

    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingLlmClient;

impl LlmClient for PanickingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        panic!("LlmClient port not configured: no cassette or live client for llm");
    }
}
