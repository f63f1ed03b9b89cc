//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the summarization core and an
//! external system (filesystem, language model). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod llm;

pub use filesystem::{DirEntry, EntryKind, FileSystem};
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
