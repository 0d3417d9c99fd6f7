// src/store/mod.rs
//
//! Persistence layer: two independent backends behind one capability
//! interface, plus the dual-write coordinator that keeps them logically
//! synchronized under the primary store's identifier.

pub mod coordinator;
pub mod journal;
pub mod sqlite;

pub use coordinator::DualWriteHistory;
pub use journal::JournalStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which dispatch path produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Stack,
    Independent,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Stack => "STACK",
            Category::Independent => "INDEPENDENT",
        }
    }

    /// Exact-match parse of the stored/wire tag.
    pub fn parse(raw: &str) -> Option<Category> {
        match raw {
            "STACK" => Some(Category::Stack),
            "INDEPENDENT" => Some(Category::Independent),
            _ => None,
        }
    }
}

/// Which of the two configured stores a history query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSelector {
    Primary,
    Secondary,
}

impl StoreSelector {
    pub fn parse(raw: &str) -> Option<StoreSelector> {
        match raw {
            "PRIMARY" => Some(StoreSelector::Primary),
            "SECONDARY" => Some(StoreSelector::Secondary),
            _ => None,
        }
    }
}

/// A computed operation awaiting persistence; the identifier is assigned
/// by the primary store during the dual write.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub category: Category,
    pub operation: String,
    pub operands: Vec<f64>,
    pub result: f64,
}

/// The row shape both stores accept. `operands_json` is the canonical
/// serialization produced once by the coordinator so both backends hold
/// byte-identical operand data.
#[derive(Debug, Clone, Copy)]
pub struct RecordRow<'a> {
    /// `None` lets the store assign an identifier (primary role);
    /// `Some` mirrors an identifier allocated elsewhere (secondary role).
    pub id: Option<i64>,
    pub category: Category,
    pub operation: &'a str,
    pub operands_json: &'a str,
    pub result: f64,
}

/// A record as a store returns it, operands still in serialized form.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: i64,
    pub category: Category,
    pub operation: String,
    pub operands_json: String,
    pub result: f64,
}

/// The wire form handed back by history queries, operands decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub category: Category,
    pub operation: String,
    pub operands: Vec<f64>,
    pub result: f64,
}

impl StoredRecord {
    pub fn decode(self) -> Result<HistoryEntry, StoreError> {
        let operands: Vec<f64> = serde_json::from_str(&self.operands_json)?;
        Ok(HistoryEntry {
            id: self.id,
            category: self.category,
            operation: self.operation,
            operands,
            result: self.result,
        })
    }
}

/// Failures inside a persistence backend or the coordinator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
    #[error("store call timed out after {0}s")]
    Timeout(u64),
}

/// The capability interface both backends implement. The coordinator and
/// history reader depend only on this, never on backend-specific types.
#[async_trait]
pub trait OperationStore: Send + Sync {
    /// Insert one record, returning the identifier it is stored under.
    async fn create(&self, row: RecordRow<'_>) -> Result<i64, StoreError>;

    /// All records in the store's natural retrieval order.
    async fn list_all(&self) -> Result<Vec<StoredRecord>, StoreError>;
}
