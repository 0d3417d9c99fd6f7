// src/state.rs

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::engine::OperandStack;
use crate::store::{DualWriteHistory, JournalStore, SqliteStore};

/// Shared application state: one stack per process plus the persistence
/// handles. All stack access goes through the mutex; the pop/compute/
/// restore sequence of a stack-mode dispatch holds it for the whole
/// critical section.
pub struct AppState {
    pub stack: Mutex<OperandStack>,
    pub history: DualWriteHistory,
    pub primary: Arc<SqliteStore>,
}

impl AppState {
    pub async fn initialize(config: &Config) -> Result<Arc<Self>> {
        let primary = Arc::new(
            SqliteStore::connect(&config.database_url, config.sqlite_max_connections).await?,
        );
        let secondary = Arc::new(JournalStore::new(&config.journal_path));
        let history = DualWriteHistory::new(
            primary.clone(),
            secondary,
            Duration::from_secs(config.store_timeout_secs),
        );

        Ok(Arc::new(Self {
            stack: Mutex::new(OperandStack::new()),
            history,
            primary,
        }))
    }
}
