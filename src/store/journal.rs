// src/store/journal.rs
// Secondary persistence backend: an append-only JSON-lines journal.
// Normally mirrors identifiers allocated by the primary store, but can
// allocate its own (max seen + 1) when asked to stand alone.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::{Category, OperationStore, RecordRow, StoreError, StoredRecord};

#[derive(Debug, Serialize, Deserialize)]
struct JournalLine {
    id: i64,
    category: Category,
    operation: String,
    operands: String,
    result: f64,
}

pub struct JournalStore {
    path: PathBuf,
    // Serializes appends and guards readers against torn lines.
    file_lock: Mutex<()>,
}

impl JournalStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file_lock: Mutex::new(()),
        }
    }

    async fn read_lines(&self) -> Result<Vec<JournalLine>, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl OperationStore for JournalStore {
    async fn create(&self, row: RecordRow<'_>) -> Result<i64, StoreError> {
        let _guard = self.file_lock.lock().await;

        let id = match row.id {
            Some(id) => id,
            None => {
                let lines = self.read_lines().await?;
                lines.iter().map(|l| l.id).max().unwrap_or(0) + 1
            }
        };

        let line = JournalLine {
            id,
            category: row.category,
            operation: row.operation.to_string(),
            operands: row.operands_json.to_string(),
            result: row.result,
        };
        let mut encoded = serde_json::to_string(&line)?;
        encoded.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(encoded.as_bytes()).await?;
        file.flush().await?;
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let _guard = self.file_lock.lock().await;
        let lines = self.read_lines().await?;
        Ok(lines
            .into_iter()
            .map(|line| StoredRecord {
                id: line.id,
                category: line.category,
                operation: line.operation,
                operands_json: line.operands,
                result: line.result,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch_store(dir: &TempDir) -> JournalStore {
        JournalStore::new(dir.path().join("journal.jsonl"))
    }

    #[tokio::test]
    async fn empty_journal_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = scratch_store(&dir);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mirrors_explicit_identifiers() {
        let dir = TempDir::new().unwrap();
        let store = scratch_store(&dir);
        store
            .create(RecordRow {
                id: Some(12),
                category: Category::Stack,
                operation: "Minus",
                operands_json: "[5.0,3.0]",
                result: 2.0,
            })
            .await
            .unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 12);
        assert_eq!(records[0].operation, "Minus");
        assert_eq!(records[0].operands_json, "[5.0,3.0]");
    }

    #[tokio::test]
    async fn allocates_past_the_highest_seen_id() {
        let dir = TempDir::new().unwrap();
        let store = scratch_store(&dir);
        let row = RecordRow {
            id: None,
            category: Category::Independent,
            operation: "Plus",
            operands_json: "[1.0,1.0]",
            result: 2.0,
        };
        assert_eq!(store.create(row).await.unwrap(), 1);
        assert_eq!(store.create(RecordRow { id: Some(9), ..row }).await.unwrap(), 9);
        assert_eq!(store.create(row).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn preserves_append_order() {
        let dir = TempDir::new().unwrap();
        let store = scratch_store(&dir);
        for id in [3, 1, 2] {
            store
                .create(RecordRow {
                    id: Some(id),
                    category: Category::Stack,
                    operation: "Abs",
                    operands_json: "[-1.0]",
                    result: 1.0,
                })
                .await
                .unwrap();
        }
        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
