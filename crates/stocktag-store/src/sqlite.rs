//! # SQLite-Backed Document Store
//!
//! A [`DocumentStore`] implementation over a single SQLite table.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  documents                                                              │
//! │  ┌────────────┬──────────────────────┬─────────────────────────────┐   │
//! │  │ collection │ id (PK)              │ body (JSON text)            │   │
//! │  ├────────────┼──────────────────────┼─────────────────────────────┤   │
//! │  │ products   │ c1f9…                │ {"name":"Laptop", …}        │   │
//! │  └────────────┴──────────────────────┴─────────────────────────────┘   │
//! │                                                                         │
//! │  query("products", [isActive == true])                                  │
//! │     ↓                                                                   │
//! │  SELECT id, body FROM documents                                         │
//! │  WHERE collection = ? AND json_extract(body, '$.isActive') = ?          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL (Write-Ahead Logging) is enabled so readers don't block writers
//! and vice versa.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::document::{Document, DocumentStore, Fields, Filter};
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/stocktag.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a single-user session)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquisition timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration with the given database path.
    /// The file is created on first connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }
}

// =============================================================================
// SqliteStore
// =============================================================================

/// Document store over a local SQLite file.
///
/// Documents are JSON text bodies; equality predicates use the built-in
/// JSON1 `json_extract`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (or creates) the database at the configured path.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        info!(path = %config.database_path.display(), "Opening document store");

        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_with(options)
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// In-memory store for tests and demos.
    ///
    /// Pinned to a single connection: each in-memory connection is its
    /// own database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id         TEXT NOT NULL PRIMARY KEY,
                body       TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents (collection)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn parse_body(id: &str, body: &str) -> StoreResult<Document> {
        let fields: Fields = serde_json::from_str(body)?;
        Ok(Document::new(id, fields))
    }
}

/// Binds a JSON value as the closest SQLite type, matching what
/// `json_extract` yields for the same value.
fn bind_json<'q, O>(
    query: sqlx::query::QueryAs<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>>,
    value: &Value,
) -> sqlx::query::QueryAs<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(flag) => query.bind(*flag),
        Value::Number(n) if n.is_i64() => query.bind(n.as_i64().unwrap_or_default()),
        Value::Number(n) => query.bind(n.as_f64().unwrap_or_default()),
        Value::String(s) => query.bind(s.clone()),
        other => query.bind(other.to_string()),
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn query(&self, collection: &str, filters: &[Filter]) -> StoreResult<Vec<Document>> {
        // Field names come from this codebase, never from user input;
        // values go through binds.
        let mut sql = String::from("SELECT id, body FROM documents WHERE collection = ?");
        for filter in filters {
            sql.push_str(&format!(
                " AND json_extract(body, '$.{}') = ?",
                filter.field
            ));
        }

        let mut query = sqlx::query_as::<_, (String, String)>(&sql).bind(collection.to_string());
        for filter in filters {
            query = bind_json(query, &filter.value);
        }

        let rows = query.fetch_all(&self.pool).await?;
        debug!(collection, filters = filters.len(), rows = rows.len(), "Query");

        rows.iter()
            .map(|(id, body)| Self::parse_body(id, body))
            .collect()
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT body FROM documents WHERE collection = ? AND id = ?",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((body,)) => Ok(Some(Self::parse_body(id, &body)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        let body = Value::Object(fields).to_string();

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(&id)
            .bind(body)
            .execute(&self.pool)
            .await?;

        debug!(collection, id = %id, "Inserted document");
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, partial: Fields) -> StoreResult<()> {
        let patch = Value::Object(partial).to_string();

        // json_patch merges the partial body over the stored one.
        let result = sqlx::query(
            "UPDATE documents SET body = json_patch(body, ?) WHERE collection = ? AND id = ?",
        )
        .bind(patch)
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        debug!(collection, id, "Updated document");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(collection, id, "Deleted document");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
