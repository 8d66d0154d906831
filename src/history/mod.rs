//! Transaction history.
//!
//! An append-only list of confirmed swaps, mirrored to a single JSON file
//! that is read once at startup and rewritten in full on every append.

use std::path::PathBuf;

use crate::types::TransactionRecord;

/// Ordered, persisted swap history. Insertion order is chronological.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<TransactionRecord>,
}

impl HistoryStore {
    /// Load the history stored at `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<TransactionRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed transaction history");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Transaction history unreadable");
                Vec::new()
            }
        };

        tracing::debug!(path = %path.display(), count = records.len(), "Transaction history loaded");

        Self { path, records }
    }

    /// Append a record and rewrite the whole file.
    ///
    /// A failed write is logged and otherwise ignored; the in-memory history
    /// keeps the record either way.
    pub async fn append(&mut self, record: TransactionRecord) {
        self.records.push(record);

        if let Err(e) = self.persist().await {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist transaction history");
        }
    }

    async fn persist(&self) -> crate::Result<()> {
        let json = serde_json::to_string(&self.records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
