use crate::{error::Result, storage::BlobStore};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File-based blob store: one JSON file per key under a root directory
pub struct FileBlobStore {
    root_path: PathBuf,
}

impl FileBlobStore {
    const DATA_DIR: &'static str = ".taskboard";
    const EXTENSION: &'static str = "json";

    /// Creates a store keeping its files under `<project_root>/.taskboard`
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::DATA_DIR),
        }
    }

    /// Directory holding the blob files
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Maps a key to its file, e.g. `kanban:board:v1` to
    /// `kanban_3aboard_3av1.json`.
    ///
    /// ASCII letters, digits and `-` pass through; every other byte,
    /// including `_`, becomes `_` plus two hex digits, so distinct keys never
    /// share a file.
    fn blob_file(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{:02x}", byte));
            }
        }
        self.root_path
            .join(format!("{}.{}", name, Self::EXTENSION))
    }

    fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path)?;
        }
        Ok(())
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.blob_file(key);

        if !file_path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&file_path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_directory_exists()?;

        let file_path = self.blob_file(key);
        let tmp_path = file_path.with_extension("json.tmp");

        // A crash mid-write must not leave a truncated board behind
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &file_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_before_any_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(temp_dir.path());

        assert!(store.get("kanban:board:v1").unwrap().is_none());
        assert!(!store.root_path().exists());
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::new(temp_dir.path());

        store.set("kanban:board:v1", r#"{"todo":[]}"#).unwrap();

        assert_eq!(
            store.get("kanban:board:v1").unwrap().as_deref(),
            Some(r#"{"todo":[]}"#)
        );
        assert!(store.root_path().join("kanban_3aboard_3av1.json").exists());
        assert!(!store.root_path().join("kanban_3aboard_3av1.json.tmp").exists());
    }

    #[test]
    fn test_set_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::new(temp_dir.path());

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_keys_do_not_collide_with_each_other() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::new(temp_dir.path());

        store.set("kanban:board:v1", "one").unwrap();
        store.set("kanban:board:v2", "two").unwrap();

        assert_eq!(store.get("kanban:board:v1").unwrap().as_deref(), Some("one"));
        assert_eq!(store.get("kanban:board:v2").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_punctuation_variants_get_separate_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::new(temp_dir.path());

        store.set("kanban:board:v1", "colons").unwrap();
        store.set("kanban_board_v1", "underscores").unwrap();
        store.set("kanban_3aboard_3av1", "escaped").unwrap();

        assert_eq!(store.get("kanban:board:v1").unwrap().as_deref(), Some("colons"));
        assert_eq!(store.get("kanban_board_v1").unwrap().as_deref(), Some("underscores"));
        assert_eq!(store.get("kanban_3aboard_3av1").unwrap().as_deref(), Some("escaped"));
    }

    #[test]
    fn test_unreadable_blob_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(temp_dir.path());
        std::fs::create_dir_all(store.blob_file("kanban:board:v1")).unwrap();

        assert!(store.get("kanban:board:v1").is_err());
    }

    #[test]
    fn test_unwritable_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should go
        let blocker = temp_dir.path().join(".taskboard");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileBlobStore::new(temp_dir.path());
        assert!(store.set("k", "v").is_err());
    }
}
