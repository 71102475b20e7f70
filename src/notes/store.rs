//! Document store capability
//!
//! Note persistence goes through an injected store rather than direct
//! filesystem calls so the save flow can be tested deterministically.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use thiserror::Error;

/// Errors surfaced by a note store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Create refused because the path is already taken
    #[error("path already exists: {0}")]
    AlreadyExists(String),
}

/// Minimal document-store surface the save flow needs
pub trait NoteStore: Send + Sync {
    /// Whether a file or folder exists at the path
    fn exists(&self, path: &str) -> bool;

    /// Create a folder (and any missing parents)
    fn create_folder(&self, path: &str) -> Result<(), StoreError>;

    /// Create a new file; refuses to overwrite
    fn create_file(&self, path: &str, content: &str) -> Result<(), StoreError>;

    /// Read an existing file
    fn read_file(&self, path: &str) -> Result<String, StoreError>;
}

/// Filesystem-backed store rooted at a base directory
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl NoteStore for FsStore {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }

    fn create_file(&self, path: &str, content: &str) -> Result<(), StoreError> {
        use std::io::Write;

        // create_new keeps the duplicate check honest even when another
        // actor wins the race between check and write.
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(path))
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    StoreError::AlreadyExists(path.to_string())
                } else {
                    StoreError::Io(e)
                }
            })?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<String, StoreError> {
        Ok(std::fs::read_to_string(self.resolve(path))?)
    }
}

/// In-memory store for deterministic tests
#[derive(Default)]
pub struct MemStore {
    files: RwLock<HashMap<String, String>>,
    folders: RwLock<Vec<String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStore for MemStore {
    fn exists(&self, path: &str) -> bool {
        self.files.read().unwrap().contains_key(path)
            || self.folders.read().unwrap().iter().any(|f| f == path)
    }

    fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        self.folders.write().unwrap().push(path.to_string());
        Ok(())
    }

    fn create_file(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let mut files = self.files.write().unwrap();
        if files.contains_key(path) {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        files.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<String, StoreError> {
        self.files.read().unwrap().get(path).cloned().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                path.to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_store_create_exists_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        assert!(!store.exists("keyword"));
        store.create_folder("keyword").unwrap();
        assert!(store.exists("keyword"));

        store.create_file("keyword/Turing.md", "body").unwrap();
        assert!(store.exists("keyword/Turing.md"));
        assert_eq!(store.read_file("keyword/Turing.md").unwrap(), "body");
    }

    #[test]
    fn fs_store_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.create_folder("keyword").unwrap();
        store.create_file("keyword/a.md", "original").unwrap();

        let err = store.create_file("keyword/a.md", "clobber").unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(store.read_file("keyword/a.md").unwrap(), "original");
    }

    #[test]
    fn mem_store_mirrors_fs_semantics() {
        let store = MemStore::new();
        assert!(!store.exists("keyword"));
        store.create_folder("keyword").unwrap();
        assert!(store.exists("keyword"));

        store.create_file("keyword/a.md", "one").unwrap();
        assert!(store.create_file("keyword/a.md", "two").is_err());
        assert_eq!(store.read_file("keyword/a.md").unwrap(), "one");
    }
}
