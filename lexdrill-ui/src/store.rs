//! Persistence gateway: whole-document JSON store
//!
//! The entire vocabulary document lives in one JSON file that is read and
//! replaced as a unit. Mutations run on a working copy under the write lock
//! and are committed to memory only after the file write succeeds, so the
//! in-memory state never gets ahead of the durable state.

use std::fs;
use std::path::{Path, PathBuf};

use lexdrill_core::{Library, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Document store holding the canonical in-memory copy of the [`Library`]
/// and its on-disk location.
pub struct DocumentStore {
    path: PathBuf,
    doc: RwLock<Library>,
}

impl DocumentStore {
    /// Open the store at `path`. A missing file initializes the default
    /// document on disk (first run); an unreadable or malformed file is an
    /// error rather than a silent reset.
    pub fn open(path: PathBuf) -> Result<Self> {
        let doc = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            let doc = Library::default();
            write_document(&path, &doc)?;
            info!("Initialized new document at {}", path.display());
            doc
        };
        Ok(Self {
            path,
            doc: RwLock::new(doc),
        })
    }

    /// Run a read-only closure against the current document.
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Library) -> R,
    {
        let guard = self.doc.read().await;
        f(&guard)
    }

    /// Apply a mutation and persist it as one unit.
    ///
    /// The closure runs on a working copy; the copy is saved to disk and only
    /// then committed to memory. If the closure or the save fails, memory is
    /// left at the pre-mutation state and the error is surfaced.
    pub async fn mutate<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Library) -> Result<R>,
    {
        let mut guard = self.doc.write().await;
        let mut working = guard.clone();
        let result = f(&mut working)?;
        write_document(&self.path, &working)?;
        *guard = working;
        Ok(result)
    }
}

/// Serialize and write atomically: temp file in the same folder, then rename
/// over the target, so a crash mid-write never leaves a truncated document.
fn write_document(path: &Path, doc: &Library) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    debug!("Document saved to {}", path.display());
    Ok(())
}
