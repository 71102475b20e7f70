//! Note persistence
//!
//! Saving a result ensures the note folder exists, then either opens the
//! existing note (duplicate titles are never overwritten) or writes a new
//! note with the fixed body template. The check-then-create sequence is
//! deliberately non-transactional.

mod store;

pub use store::{FsStore, MemStore, NoteStore, StoreError};

use crate::notify::Notify;
use crate::search::SearchResult;
use std::sync::Arc;
use tracing::info;

/// Outcome of a save attempt, carrying the note path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new note was written
    Created(String),
    /// A note with this title already existed and was left untouched
    AlreadyExists(String),
}

impl SaveOutcome {
    /// Path of the note involved, created or pre-existing
    pub fn path(&self) -> &str {
        match self {
            SaveOutcome::Created(path) | SaveOutcome::AlreadyExists(path) => path,
        }
    }
}

/// Persists chosen results as notes through an injected store.
pub struct NoteSaver {
    store: Arc<dyn NoteStore>,
    folder: String,
    notify: Arc<dyn Notify>,
}

impl NoteSaver {
    pub fn new(store: Arc<dyn NoteStore>, folder: impl Into<String>, notify: Arc<dyn Notify>) -> Self {
        Self {
            store,
            folder: folder.into(),
            notify,
        }
    }

    /// Path a result's note would live at
    pub fn note_path(&self, result: &SearchResult) -> String {
        format!("{}/{}.md", self.folder, result.title)
    }

    /// Save a result as a note, or surface the existing one
    pub fn save(&self, result: &SearchResult) -> Result<SaveOutcome, StoreError> {
        if !self.store.exists(&self.folder) {
            self.store.create_folder(&self.folder)?;
        }

        let path = self.note_path(result);
        if self.store.exists(&path) {
            info!("note already exists at {}", path);
            self.notify
                .info(&format!("Note already exists: {}", result.title));
            return Ok(SaveOutcome::AlreadyExists(path));
        }

        self.store.create_file(&path, &result.note_body())?;
        info!("note created at {}", path);
        self.notify
            .info(&format!("Note created: {}", result.title));
        Ok(SaveOutcome::Created(path))
    }

    /// Read a note back, used to open an existing note after a duplicate hit
    pub fn read(&self, path: &str) -> Result<String, StoreError> {
        self.store.read_file(path)
    }
}
