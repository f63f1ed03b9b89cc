//! Project summarization pipeline.
//!
//! collector → requester → tree → render

pub mod collector;
pub mod render;
pub mod requester;
pub mod tree;

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Placeholder used when the service answered without any text.
pub const NO_SUMMARY: &str = "No summary provided.";

/// Placeholder used when the service call failed.
pub const ERROR_SUMMARY: &str = "Error occurred during summarization.";

/// A collected file. Immutable once produced by the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Full path as passed to the filesystem port.
    pub path: PathBuf,
    /// Path relative to the project root, `/`-separated.
    pub relative: String,
    /// Base file name.
    pub name: String,
    /// File contents.
    pub content: String,
}

/// File key to summary text, iterated in key order.
pub type SummaryMap = BTreeMap<String, String>;

pub use collector::{Collection, Collector};
pub use render::print_summaries_tree;
pub use requester::Requester;
pub use tree::{build_tree, TreeNode};
