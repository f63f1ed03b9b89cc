//! Rebuilds a directory hierarchy from flat `/`-separated keys.

use std::collections::BTreeMap;

use crate::summary::SummaryMap;

/// A node of the reconstructed hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A directory and its children by name.
    Directory(BTreeMap<String, TreeNode>),
    /// A file and its summary text.
    File(String),
}

impl TreeNode {
    /// An empty directory.
    #[must_use]
    pub fn empty_dir() -> Self {
        Self::Directory(BTreeMap::new())
    }

    /// Children of a directory; `None` for a file.
    #[must_use]
    pub fn children(&self) -> Option<&BTreeMap<String, TreeNode>> {
        match self {
            Self::Directory(children) => Some(children),
            Self::File(_) => None,
        }
    }

    /// Inserts `summary` at the path given by `segments`, creating
    /// directories on demand. A file standing where a directory is needed
    /// is replaced, as is an existing node at the final segment.
    pub fn insert<'s>(&mut self, segments: impl IntoIterator<Item = &'s str>, summary: String) {
        let segments: Vec<&str> = segments.into_iter().filter(|s| !s.is_empty()).collect();
        let Some((leaf, dirs)) = segments.split_last() else {
            return;
        };

        let mut children = self.dir_children_mut();
        for dir in dirs {
            children = children.entry((*dir).to_string()).or_insert_with(Self::empty_dir).dir_children_mut();
        }
        children.insert((*leaf).to_string(), Self::File(summary));
    }

    fn dir_children_mut(&mut self) -> &mut BTreeMap<String, TreeNode> {
        if let Self::File(_) = self {
            *self = Self::empty_dir();
        }
        match self {
            Self::Directory(children) => children,
            Self::File(_) => unreachable!("file node replaced by a directory above"),
        }
    }
}

/// Builds the tree for a summary map. The root is always a directory.
#[must_use]
pub fn build_tree(summaries: &SummaryMap) -> TreeNode {
    let mut root = TreeNode::empty_dir();
    for (key, summary) in summaries {
        root.insert(key.split('/'), summary.clone());
    }
    root
}
