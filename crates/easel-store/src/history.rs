use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::GenerationRecord;

/// Maximum number of records retained in the history document.
pub const HISTORY_CAP: usize = 10;

/// Persistent, capped, newest-first log of past generations.
///
/// The whole log lives in a single JSON array document that is rewritten in
/// full on every append. A mutex serializes read-modify-write cycles so two
/// concurrent generations cannot drop each other's records.
pub struct HistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert `record` at the front, truncate to [`HISTORY_CAP`] entries and
    /// rewrite the document.
    pub async fn append(&self, record: GenerationRecord) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut log = self.read_document().await?;
        log.insert(0, record);
        log.truncate(HISTORY_CAP);

        let json = serde_json::to_vec_pretty(&log)?;
        fs::write(&self.path, json).await?;

        tracing::debug!(entries = log.len(), path = %self.path.display(), "History updated");
        Ok(())
    }

    /// The full persisted log, newest first.
    ///
    /// An absent document is an empty log, not an error; a document that no
    /// longer parses is surfaced as a read failure.
    pub async fn load(&self) -> Result<Vec<GenerationRecord>> {
        let _guard = self.lock.lock().await;
        self.read_document().await
    }

    /// Delete the document. Clearing an already-absent history succeeds.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;

        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_document(&self) -> Result<Vec<GenerationRecord>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
