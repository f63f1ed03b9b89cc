//! File collection: walks a project through the filesystem port and builds
//! the shared project context.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::CollectConfig;
use crate::error::{Error, Result};
use crate::logging::LogConfig;
use crate::ports::filesystem::{EntryKind, FileSystem};
use crate::summary::FileRecord;

/// Separator placed between file blocks in the project context.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Leading character marking hidden files and directories.
const HIDDEN_MARKER: char = '.';

/// Output of a collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Every readable, non-excluded file in walk order.
    pub files: Vec<FileRecord>,
    /// All file blocks joined by [`CONTEXT_SEPARATOR`].
    pub context: String,
    /// Files collected but left out of `context` because of the size budget.
    pub omitted_from_context: usize,
}

impl Collection {
    /// `true` when the walk found nothing to summarize.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Walks a project tree and reads every eligible file.
pub struct Collector<'a> {
    fs: &'a dyn FileSystem,
    blacklist: HashSet<String>,
    max_context_chars: Option<usize>,
    log: LogConfig,
}

impl<'a> Collector<'a> {
    /// Creates a collector reading through `fs`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, config: &CollectConfig, log: &LogConfig) -> Self {
        Self {
            fs,
            blacklist: config.blacklist.iter().cloned().collect(),
            max_context_chars: config.max_context_chars,
            log: log.clone(),
        }
    }

    /// Collects every file under `root`.
    ///
    /// Hidden directories are not descended into; hidden and blacklisted
    /// files are skipped. Unreadable files are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootUnreadable`] if `root` itself cannot be listed.
    pub fn collect(&self, root: &Path) -> Result<Collection> {
        let entries = self
            .fs
            .list_dir(root)
            .map_err(|source| Error::RootUnreadable { path: root.to_path_buf(), source })?;

        let mut files = Vec::new();
        self.visit(root, "", entries, &mut files);

        let (context, omitted_from_context) = self.build_context(&files);
        if omitted_from_context > 0 {
            tracing::warn!(
                omitted = omitted_from_context,
                budget = ?self.max_context_chars,
                "project context exceeds budget; trailing files left out of the context"
            );
        }
        tracing::info!(files = files.len(), context_chars = context.len(), "collection finished");

        Ok(Collection { files, context, omitted_from_context })
    }

    fn visit(
        &self,
        dir: &Path,
        relative_dir: &str,
        entries: Vec<crate::ports::DirEntry>,
        files: &mut Vec<FileRecord>,
    ) {
        for entry in entries {
            if entry.name.starts_with(HIDDEN_MARKER) {
                tracing::debug!(name = %entry.name, "skipping hidden entry");
                continue;
            }

            let path = dir.join(&entry.name);
            let relative = if relative_dir.is_empty() {
                entry.name.clone()
            } else {
                format!("{relative_dir}/{}", entry.name)
            };

            match entry.kind {
                EntryKind::Dir => match self.fs.list_dir(&path) {
                    Ok(children) => self.visit(&path, &relative, children, files),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "cannot list directory, skipping");
                    }
                },
                EntryKind::File => {
                    if self.blacklist.contains(&entry.name) {
                        tracing::debug!(path = %relative, "skipping blacklisted file");
                        continue;
                    }
                    if let Some(record) = self.read(path, relative, entry.name) {
                        files.push(record);
                    }
                }
            }
        }
    }

    fn read(&self, path: PathBuf, relative: String, name: String) -> Option<FileRecord> {
        match self.fs.read_to_string(&path) {
            Ok(content) => {
                if self.log.per_file {
                    tracing::info!(path = %relative, bytes = content.len(), "collected file");
                } else {
                    tracing::debug!(path = %relative, bytes = content.len(), "collected file");
                }
                Some(FileRecord { path, relative, name, content })
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "error reading file, skipping");
                None
            }
        }
    }

    /// Joins file blocks in walk order, stopping at the first block that
    /// would push the context past the budget.
    fn build_context(&self, files: &[FileRecord]) -> (String, usize) {
        let mut context = String::new();
        let mut chars = 0;
        for (i, file) in files.iter().enumerate() {
            let block = context_block(file);
            let separator = if i == 0 { "" } else { CONTEXT_SEPARATOR };
            let grown = chars + separator.chars().count() + block.chars().count();
            if self.max_context_chars.is_some_and(|budget| grown > budget) {
                return (context, files.len() - i);
            }
            chars = grown;
            context.push_str(separator);
            context.push_str(&block);
        }
        (context, 0)
    }
}

/// One fenced block of the project context, labelled with the file name.
#[must_use]
pub fn context_block(file: &FileRecord) -> String {
    format!("```{}\n{}\n```", file.name, file.content)
}
