//! `treesum summarize` command.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::SummarizeArgs;
use crate::config::{CollectConfig, RequestConfig};
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::logging::LogConfig;
use crate::summary::{print_summaries_tree, Collector, Requester};

/// When set to a directory, every port interaction is recorded to
/// per-port cassette files under it.
pub const RECORD_ENV: &str = "TREESUM_RECORD";

/// Execute the `summarize` command.
///
/// # Errors
///
/// Returns an error for invalid configuration, an unreadable project root,
/// or a failure writing output or cassettes. Per-file failures are not errors.
pub fn run(args: &SummarizeArgs, log: &LogConfig) -> Result<()> {
    let collect = args.collect.collect_config();
    let request = args.request_config()?;
    let llm = args.llm_config();
    let project = collect.project_name();

    // Requests are awaited one by one, so a single-threaded runtime suffices.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Ok(dir) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(&PathBuf::from(dir), &project, &llm)?;
        let result =
            runtime.block_on(run_with_context(&ctx, &collect, &request, log, &project, &mut out));

        // Recording adapters hold the recorders; release them before finishing.
        drop(ctx);
        let output_dir = session.finish().map_err(Error::Recording)?;
        tracing::info!(dir = %output_dir.display(), "recording saved");
        return result;
    }

    let ctx = ServiceContext::live(&llm)?;
    runtime.block_on(run_with_context(&ctx, &collect, &request, log, &project, &mut out))
}

/// Collect, summarize, and print the tree using the given service context.
async fn run_with_context<W: Write>(
    ctx: &ServiceContext,
    collect: &CollectConfig,
    request: &RequestConfig,
    log: &LogConfig,
    project: &str,
    out: &mut W,
) -> Result<()> {
    let collection = Collector::new(ctx.fs.as_ref(), collect, log).collect(&collect.root)?;
    if collection.is_empty() {
        writeln!(out, "No files found in the project.")?;
        return Ok(());
    }

    tracing::info!(
        files = collection.files.len(),
        model = %request.model,
        "requesting summaries"
    );
    let summaries = Requester::new(ctx.llm.as_ref(), request, log)
        .summarize_all(&collection.files, &collection.context)
        .await;

    print_summaries_tree(project, &summaries, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::adapters::replaying::ReplayingLlmClient;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;
    use crate::config::{SummaryKey, DEFAULT_MAX_TOKENS};
    use serde_json::json;

    fn llm_answers(outputs: Vec<serde_json::Value>) -> ReplayingLlmClient {
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
        ReplayingLlmClient::new(CassetteReplayer::new(&Cassette::new("e2e", "demo", interactions)))
    }

    fn request(key: SummaryKey) -> RequestConfig {
        RequestConfig { model: "llama3.2".into(), max_tokens: DEFAULT_MAX_TOKENS, key }
    }

    fn collect(root: &std::path::Path) -> CollectConfig {
        CollectConfig { root: root.to_path_buf(), blacklist: vec![], max_context_chars: None }
    }

    #[tokio::test]
    async fn end_to_end_tree() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("a/x.py"), "print(1)").unwrap();
        std::fs::write(dir.path().join("b.py"), "print(2)").unwrap();

        // Walk order is a/x.py then b.py.
        let ctx = ServiceContext::new(
            Box::new(LiveFileSystem),
            Box::new(llm_answers(vec![
                json!({"ok": {"text": "Does X"}}),
                json!({"ok": {"text": "Does Y"}}),
            ])),
        );

        let mut out = Vec::new();
        run_with_context(
            &ctx,
            &collect(dir.path()),
            &request(SummaryKey::RelativePath),
            &LogConfig::default(),
            "demo",
            &mut out,
        )
        .await
        .unwrap();

        let expected = "\n\n---Project Summaries: demo ---\n\
                        ├── a\n\
                        │   └── x.py\n\
                        │       Does X\n\
                        └── b.py\n    Does Y\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[tokio::test]
    async fn failed_call_renders_error_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.py"), "print(2)").unwrap();

        let ctx = ServiceContext::new(
            Box::new(LiveFileSystem),
            Box::new(llm_answers(vec![json!({"err": "connection refused"})])),
        );

        let mut out = Vec::new();
        run_with_context(
            &ctx,
            &collect(dir.path()),
            &request(SummaryKey::RelativePath),
            &LogConfig::default(),
            "demo",
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("└── b.py\n    Error occurred during summarization.\n"));
    }

    #[tokio::test]
    async fn empty_project_exits_early() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::new(Box::new(LiveFileSystem), Box::new(llm_answers(vec![])));

        let mut out = Vec::new();
        run_with_context(
            &ctx,
            &collect(dir.path()),
            &request(SummaryKey::RelativePath),
            &LogConfig::default(),
            "demo",
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "No files found in the project.\n");
    }
}
