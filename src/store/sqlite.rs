// src/store/sqlite.rs
// Primary persistence backend: SQLite via sqlx. Owns identifier
// allocation through the table's AUTOINCREMENT column.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::{Category, OperationStore, RecordRow, StoreError, StoredRecord};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS operations (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    category  TEXT NOT NULL,
    operation TEXT NOT NULL,
    operands  TEXT NOT NULL,
    result    REAL NOT NULL
)
"#;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and ensure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            // Keep one connection alive so in-memory databases survive
            // idle reaping.
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        info!("sqlite store ready: {database_url}");
        Ok(Self { pool })
    }

    /// Connectivity probe for health checks.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl OperationStore for SqliteStore {
    async fn create(&self, row: RecordRow<'_>) -> Result<i64, StoreError> {
        match row.id {
            Some(id) => {
                sqlx::query(
                    "INSERT INTO operations (id, category, operation, operands, result) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(id)
                .bind(row.category.as_str())
                .bind(row.operation)
                .bind(row.operands_json)
                .bind(row.result)
                .execute(&self.pool)
                .await?;
                Ok(id)
            }
            None => {
                let done = sqlx::query(
                    "INSERT INTO operations (category, operation, operands, result) \
                     VALUES (?, ?, ?, ?)",
                )
                .bind(row.category.as_str())
                .bind(row.operation)
                .bind(row.operands_json)
                .bind(row.result)
                .execute(&self.pool)
                .await?;
                Ok(done.last_insert_rowid())
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let rows: Vec<(i64, String, String, String, f64)> = sqlx::query_as(
            "SELECT id, category, operation, operands, result FROM operations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, category, operation, operands_json, result)| {
                let category = Category::parse(&category).ok_or_else(|| {
                    StoreError::Corrupt(format!("record {id} has unknown category {category:?}"))
                })?;
                Ok(StoredRecord {
                    id,
                    category,
                    operation,
                    operands_json,
                    result,
                })
            })
            .collect()
    }
}
