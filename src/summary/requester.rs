//! Per-file summary requests grounded in the whole-project context.

use crate::config::{RequestConfig, SummaryKey};
use crate::logging::LogConfig;
use crate::ports::llm::{CompletionRequest, LlmClient};
use crate::summary::{FileRecord, SummaryMap, ERROR_SUMMARY, NO_SUMMARY};

/// Asks the language model for one summary per file, one request at a time.
pub struct Requester<'a> {
    llm: &'a dyn LlmClient,
    config: RequestConfig,
    log: LogConfig,
}

impl<'a> Requester<'a> {
    /// Creates a requester sending through `llm`.
    #[must_use]
    pub fn new(llm: &'a dyn LlmClient, config: &RequestConfig, log: &LogConfig) -> Self {
        Self { llm, config: config.clone(), log: log.clone() }
    }

    /// Summarizes every file in order and never fails.
    ///
    /// Each request is awaited before the next is sent. A failed or empty
    /// response is recorded as a placeholder so every file yields an entry.
    pub async fn summarize_all(&self, files: &[FileRecord], context: &str) -> SummaryMap {
        let mut summaries = SummaryMap::new();
        let total = files.len();

        for (i, file) in files.iter().enumerate() {
            let key = summary_key(file, self.config.key);
            let request = CompletionRequest {
                model: self.config.model.clone(),
                prompt: build_prompt(context, file),
                max_tokens: self.config.max_tokens,
            };

            let summary = match self.llm.complete(&request).await {
                Ok(response) => {
                    if self.log.per_file {
                        tracing::info!(
                            file = %file.relative,
                            progress = %format!("{}/{total}", i + 1),
                            completion_tokens = response.completion_tokens,
                            "summarized file"
                        );
                    } else {
                        tracing::debug!(file = %file.relative, "summarized file");
                    }
                    match response.text {
                        Some(text) if !text.is_empty() => text,
                        _ => NO_SUMMARY.to_string(),
                    }
                }
                Err(e) => {
                    tracing::warn!(file = %file.relative, error = %e, "error summarizing file");
                    ERROR_SUMMARY.to_string()
                }
            };

            if let Some(previous) = summaries.insert(key.clone(), summary) {
                tracing::warn!(
                    key = %key,
                    file = %file.relative,
                    dropped_chars = previous.len(),
                    "summary key collision; earlier summary overwritten"
                );
            }
        }

        summaries
    }
}

/// Map key for a file under the given keying policy.
#[must_use]
pub fn summary_key(file: &FileRecord, key: SummaryKey) -> String {
    match key {
        SummaryKey::RelativePath => file.relative.clone(),
        SummaryKey::Basename => file.name.clone(),
    }
}

/// Builds the grounding prompt for one file.
#[must_use]
pub fn build_prompt(context: &str, file: &FileRecord) -> String {
    let path = &file.relative;
    let content = &file.content;
    format!(
        "You are an expert code assistant. Below is the content of several files from a \
         software project. Your task is to summarize one specific file in the context of the \
         entire project.\n\n\
         === Full Project Context Start ===\n\
         {context}\n\
         === Full Project Context End ===\n\n\
         Now, please provide a concise summary for the following file:\n\
         File Path (relative to project root): {path}\n\
         File Content:\n```\n{content}\n```\n\n\
         The summary should explain the primary role, purpose, and key functionalities or \
         contents of this specific file ({path}) and how it relates to or interacts with other \
         parts of the project, based on the provided context. Focus only on the specified file."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingLlmClient;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;
    use crate::config::DEFAULT_MAX_TOKENS;
    use serde_json::json;
    use std::path::PathBuf;

    fn record(relative: &str, content: &str) -> FileRecord {
        FileRecord {
            path: PathBuf::from("/demo").join(relative),
            relative: relative.into(),
            name: relative.rsplit('/').next().unwrap().into(),
            content: content.into(),
        }
    }

    fn replaying(outputs: Vec<serde_json::Value>) -> ReplayingLlmClient {
        let interactions = outputs
            .into_iter()
            .enumerate()
            .map(|(i, output)| Interaction {
                seq: i as u64,
                port: "llm".into(),
                method: "complete".into(),
                input: json!({}),
                output,
            })
            .collect();
        ReplayingLlmClient::new(CassetteReplayer::new(&Cassette::new("req", "demo", interactions)))
    }

    fn request_config(key: SummaryKey) -> RequestConfig {
        RequestConfig { model: "llama3.2".into(), max_tokens: DEFAULT_MAX_TOKENS, key }
    }

    #[test]
    fn prompt_wraps_context_and_names_file() {
        let file = record("a/x.py", "print(1)");
        let prompt = build_prompt("CTX", &file);
        assert!(prompt.contains("=== Full Project Context Start ===\nCTX\n=== Full Project Context End ==="));
        assert!(prompt.contains("File Path (relative to project root): a/x.py"));
        assert!(prompt.contains("File Content:\n```\nprint(1)\n```"));
        assert!(prompt.ends_with("Focus only on the specified file."));
    }

    #[tokio::test]
    async fn every_file_yields_one_entry() {
        let files = vec![record("a/x.py", "print(1)"), record("b.py", "print(2)"), record("c.py", "")];
        let llm = replaying(vec![
            json!({"ok": {"text": "Does X"}}),
            json!({"err": "connection refused"}),
            json!({"ok": {"text": null}}),
        ]);
        let requester =
            Requester::new(&llm, &request_config(SummaryKey::RelativePath), &LogConfig::default());

        let summaries = requester.summarize_all(&files, "ctx").await;

        assert_eq!(summaries.len(), files.len());
        assert_eq!(summaries["a/x.py"], "Does X");
        assert_eq!(summaries["b.py"], ERROR_SUMMARY);
        assert_eq!(summaries["c.py"], NO_SUMMARY);
    }

    #[tokio::test]
    async fn basename_keys_collide_and_later_wins() {
        let files = vec![record("a/mod.rs", "a"), record("b/mod.rs", "b")];
        let llm = replaying(vec![json!({"ok": {"text": "first"}}), json!({"ok": {"text": "second"}})]);
        let requester =
            Requester::new(&llm, &request_config(SummaryKey::Basename), &LogConfig::default());

        let summaries = requester.summarize_all(&files, "ctx").await;

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries["mod.rs"], "second");
    }

    #[tokio::test]
    async fn empty_input_makes_no_requests() {
        let llm = replaying(vec![]);
        let requester =
            Requester::new(&llm, &request_config(SummaryKey::RelativePath), &LogConfig::default());
        assert!(requester.summarize_all(&[], "").await.is_empty());
    }
}
