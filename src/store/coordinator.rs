// src/store/coordinator.rs
// Dual-write coordinator: primary write allocates the identifier, the
// secondary write mirrors the record under that identifier.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error};

use super::{
    Category, HistoryEntry, OperationStore, RecordDraft, RecordRow, StoreError, StoreSelector,
    StoredRecord,
};

pub struct DualWriteHistory {
    primary: Arc<dyn OperationStore>,
    secondary: Arc<dyn OperationStore>,
    store_timeout: Duration,
}

impl DualWriteHistory {
    pub fn new(
        primary: Arc<dyn OperationStore>,
        secondary: Arc<dyn OperationStore>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            store_timeout,
        }
    }

    /// Persist one computed operation in both stores and return the
    /// identifier the primary store assigned.
    ///
    /// If the primary write fails nothing is persisted anywhere. If the
    /// secondary write fails the primary record stays in place and the
    /// error propagates; there is no compensating delete and no retry.
    /// The primary is the durability source of truth and the secondary
    /// may fall behind on a crash between the two writes.
    pub async fn persist(&self, draft: &RecordDraft) -> Result<i64, StoreError> {
        let operands_json = serde_json::to_string(&draft.operands)?;
        let row = RecordRow {
            id: None,
            category: draft.category,
            operation: &draft.operation,
            operands_json: &operands_json,
            result: draft.result,
        };

        let id = self.bounded(self.primary.create(row)).await?;
        debug!("primary store assigned id {id} to {}", draft.operation);

        self.bounded(self.secondary.create(RecordRow { id: Some(id), ..row }))
            .await
            .map_err(|e| {
                error!("secondary store write failed for id {id}: {e}");
                e
            })?;
        Ok(id)
    }

    /// Read all records from one store, newest ordering left to the
    /// store itself, optionally filtered by category (exact match).
    pub async fn history(
        &self,
        selector: StoreSelector,
        filter: Option<Category>,
    ) -> Result<Vec<HistoryEntry>, StoreError> {
        let store = self.select(selector);
        let records = self.bounded(store.list_all()).await?;
        records
            .into_iter()
            .filter(|record| filter.is_none_or(|category| record.category == category))
            .map(StoredRecord::decode)
            .collect()
    }

    fn select(&self, selector: StoreSelector) -> &dyn OperationStore {
        match selector {
            StoreSelector::Primary => self.primary.as_ref(),
            StoreSelector::Secondary => self.secondary.as_ref(),
        }
    }

    /// A store call that never returns would otherwise pin the request
    /// forever; bound every round trip.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.store_timeout.as_secs())),
        }
    }
}
