//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::{DirEntry, EntryKind, FileSystem};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let kind = if file_type.is_symlink() {
                // Linked files count as files; linked directories are never descended.
                match std::fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => EntryKind::File,
                    Ok(meta) if meta.is_dir() => {
                        tracing::debug!(path = %entry.path().display(), "not following directory symlink");
                        continue;
                    }
                    _ => continue,
                }
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                continue;
            };
            entries.push(DirEntry { name, kind });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_dir_is_sorted_and_typed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("c.txt"), "c").unwrap();

        let entries = LiveFileSystem.list_dir(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![DirEntry::dir("a"), DirEntry::file("b.txt"), DirEntry::file("c.txt")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn list_dir_keeps_file_links_and_drops_directory_links() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("real.txt"), "r").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub").join("up")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("sub_link")).unwrap();

        let entries = LiveFileSystem.list_dir(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![DirEntry::file("link.txt"), DirEntry::file("real.txt"), DirEntry::dir("sub")]
        );
        assert!(LiveFileSystem.list_dir(&dir.path().join("sub")).unwrap().is_empty());
    }

    #[test]
    fn read_to_string_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(LiveFileSystem.read_to_string(&path).is_err());
    }

    #[test]
    fn list_dir_missing_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.list_dir(&dir.path().join("nope")).is_err());
    }
}
