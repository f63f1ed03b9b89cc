//! Live adapters for the `LlmClient` port.
//!
//! [`OllamaLlmClient`] talks to a local Ollama server's chat endpoint and is
//! the default provider. [`AnthropicLlmClient`] calls the Anthropic messages
//! API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Default Ollama server address.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A single chat message; both providers accept the same shape.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// --- Ollama ---

/// Live LLM client for an Ollama server.
pub struct OllamaLlmClient {
    client: Client,
    host: String,
}

impl OllamaLlmClient {
    /// Creates a client for the server at `host` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let host = host.into().trim_end_matches('/').to_string();
        Ok(Self { client, host })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.host)
    }
}

/// Request body for `POST /api/chat`.
#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
}

/// Non-streaming chat response.
#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OllamaError {
    error: String,
}

impl LlmClient for OllamaLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let body = OllamaRequest {
                model: &request.model,
                messages: vec![ChatMessage { role: "user", content: &request.prompt }],
                stream: false,
                options: OllamaOptions { num_predict: request.max_tokens },
            };

            let response = self
                .client
                .post(self.chat_url())
                .json(&body)
                .send()
                .await
                .map_err(|e| -> BoxError { format!("Ollama request failed: {e}").into() })?;

            let status = response.status();
            let response_text = response
                .text()
                .await
                .map_err(|e| -> BoxError { format!("Failed to read Ollama response: {e}").into() })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<OllamaError>(&response_text)
                    .map(|e| e.error)
                    .unwrap_or(response_text);
                return Err(format!("Ollama error ({}): {msg}", status.as_u16()).into());
            }

            parse_ollama_response(&response_text)
        })
    }
}

fn parse_ollama_response(body: &str) -> Result<CompletionResponse, BoxError> {
    let parsed: OllamaResponse = serde_json::from_str(body)
        .map_err(|e| -> BoxError { format!("Failed to parse Ollama response: {e}").into() })?;
    Ok(CompletionResponse {
        text: parsed.message.and_then(|m| m.content),
        prompt_tokens: parsed.prompt_eval_count,
        completion_tokens: parsed.eval_count,
    })
}

// --- Anthropic ---

/// Live LLM client that calls the Anthropic Claude API.
pub struct AnthropicLlmClient {
    client: Client,
    api_key: String,
}

impl AnthropicLlmClient {
    /// Creates a client authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key: api_key.into() })
    }
}

/// Request body sent to the Anthropic messages API.
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

/// Top-level response from the Anthropic messages API.
#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

/// A content block in the Anthropic response. Non-text blocks carry no text.
#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Token usage reported by the Anthropic API.
#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Error response from the Anthropic API.
#[derive(Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

#[derive(Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

impl LlmClient for AnthropicLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let body = AnthropicRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                messages: vec![ChatMessage { role: "user", content: &request.prompt }],
            };

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> BoxError { format!("Anthropic API request failed: {e}").into() })?;

            let status = response.status();
            let response_text = response.text().await.map_err(|e| -> BoxError {
                format!("Failed to read Anthropic API response: {e}").into()
            })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<AnthropicError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("Anthropic API error ({}): {msg}", status.as_u16()).into());
            }

            parse_anthropic_response(&response_text)
        })
    }
}

fn parse_anthropic_response(body: &str) -> Result<CompletionResponse, BoxError> {
    let parsed: AnthropicResponse = serde_json::from_str(body).map_err(|e| -> BoxError {
        format!("Failed to parse Anthropic API response: {e}").into()
    })?;

    let text: String = parsed.content.into_iter().filter_map(|block| block.text).collect();
    let (prompt_tokens, completion_tokens) =
        parsed.usage.map_or((0, 0), |u| (u.input_tokens, u.output_tokens));

    Ok(CompletionResponse {
        text: if text.is_empty() { None } else { Some(text) },
        prompt_tokens,
        completion_tokens,
    })
}
