//! Recording adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{CompletionFuture, CompletionRequest, LlmClient};

/// Records LLM interactions while delegating to an inner implementation.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLlmClient {
    /// Creates a new recording LLM client wrapping the given implementation.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            record_result(&self.recorder, "llm", "complete", &request, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CompletionResponse;
    use serde_json::json;

    struct EchoLlm;

    impl LlmClient for EchoLlm {
        fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
            let text = format!("echo: {}", request.prompt);
            Box::pin(async move {
                Ok(CompletionResponse { text: Some(text), ..CompletionResponse::default() })
            })
        }
    }

    #[tokio::test]
    async fn records_request_and_response() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            dir.path().join("llm.cassette.yaml"),
            "llm",
            "demo",
        )));
        let client = RecordingLlmClient::new(Box::new(EchoLlm), Arc::clone(&recorder));

        let request =
            CompletionRequest { model: "llama3.2".into(), prompt: "hi".into(), max_tokens: 8 };
        let response = client.complete(&request).await.unwrap();
        assert_eq!(response.text.as_deref(), Some("echo: hi"));
        drop(client);

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        let path = recorder.finish().unwrap();
        let cassette = crate::cassette::config::CassetteConfig::load_cassette(&path).unwrap();
        let interaction = &cassette.interactions[0];
        assert_eq!(interaction.input["model"], json!("llama3.2"));
        assert_eq!(interaction.output["ok"]["text"], json!("echo: hi"));
    }
}
