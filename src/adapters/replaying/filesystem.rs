//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{DirEntry, FileSystem};

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        replay_result(&output, "fs::read_to_string")
    }

    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "list_dir");
        replay_result(&output, "fs::list_dir")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        CassetteReplayer::new(&Cassette::new("test", "demo", interactions))
    }

    fn fs_interaction(method: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq: 0,
            port: "fs".into(),
            method: method.into(),
            input: json!({"path": "/demo"}),
            output,
        }
    }

    #[test]
    fn replaying_fs_read_to_string() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![fs_interaction(
            "read_to_string",
            json!({"ok": "file contents"}),
        )]));
        assert_eq!(fs.read_to_string(Path::new("/demo/a")).unwrap(), "file contents");
    }

    #[test]
    fn replaying_fs_read_to_string_error() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![fs_interaction(
            "read_to_string",
            json!({"err": "stream did not contain valid UTF-8"}),
        )]));
        let err = fs.read_to_string(Path::new("/demo/blob")).unwrap_err();
        assert!(err.to_string().contains("valid UTF-8"));
    }

    #[test]
    fn replaying_fs_list_dir() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![fs_interaction(
            "list_dir",
            json!({"ok": [{"name": "a", "kind": "dir"}, {"name": "b.py", "kind": "file"}]}),
        )]));
        assert_eq!(
            fs.list_dir(Path::new("/demo")).unwrap(),
            vec![DirEntry::dir("a"), DirEntry::file("b.py")]
        );
    }
}
