//! Persistence gateway.
//!
//! [`Database`] owns the sqlx SQLite pool, creates the schema at startup and
//! hands out [`UnitOfWork`]s: explicit transactions that execute positional
//! statements until they are committed or rolled back.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

use super::schema::SCHEMA;
use crate::config::DatabaseConfig;
use crate::domain::shared::{DishId, OrderId, RestaurantId, StoreError};

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// INTEGER parameter.
    Integer(i64),
    /// TEXT parameter.
    Text(String),
    /// Timestamp, stored as TEXT.
    Timestamp(DateTime<Utc>),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<RestaurantId> for SqlValue {
    fn from(value: RestaurantId) -> Self {
        Self::Integer(value.get())
    }
}

impl From<DishId> for SqlValue {
    fn from(value: DishId) -> Self {
        Self::Integer(value.get())
    }
}

impl From<OrderId> for SqlValue {
    fn from(value: OrderId) -> Self {
        Self::Text(value.to_string())
    }
}

/// Bind every parameter, in order, onto a sqlx query.
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for param in $params {
            query = match param {
                SqlValue::Integer(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.as_str()),
                SqlValue::Timestamp(v) => query.bind(*v),
            };
        }
        query
    }};
}

/// Handle to the relational store.
///
/// Constructed once at startup and shared as `Arc<Database>`.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool described by `config`.
    ///
    /// Foreign keys are enforced on every connection. For file databases the
    /// parent directory is created when missing. A connection waits up to the
    /// acquire timeout for another connection's write lock.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(config.create_if_missing)
            .foreign_keys(true)
            .busy_timeout(config.acquire_timeout());

        // In-memory databases get a bare synthetic name with no parent.
        if let Some(parent) = options
            .get_filename()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Connection(format!("{}: {e}", parent.display())))?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            // An in-memory database lives exactly as long as its connection.
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        info!(
            url = %config.url,
            max_connections = config.max_connections,
            "SQLite connection pool initialized"
        );

        Ok(Self { pool })
    }

    /// Open a private single-connection in-memory database with the schema
    /// already created.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let config = DatabaseConfig::in_memory();
        let db = Self::connect(&config).await?;
        db.ensure_schema().await?;
        Ok(db)
    }

    /// Create any missing table.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!(tables = SCHEMA.len(), "Schema ensured");
        Ok(())
    }

    /// Open a write transaction.
    ///
    /// The write lock is taken up front with `BEGIN IMMEDIATE`, so a unit
    /// that reads before it writes never has to upgrade its lock. Concurrent
    /// units queue on the lock instead of failing with `SQLITE_BUSY`.
    pub async fn begin(&self) -> Result<UnitOfWork, StoreError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(UnitOfWork { tx })
    }

    /// Run one statement outside any transaction and return the affected row count.
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64, StoreError> {
        let query = bind_params!(sqlx::query(sql), params);
        Ok(query.execute(&self.pool).await?.rows_affected())
    }

    /// Count the rows a `SELECT COUNT(*) ...` statement reports.
    pub async fn count(&self, sql: &str, params: &[SqlValue]) -> Result<i64, StoreError> {
        let query = bind_params!(sqlx::query_scalar::<_, i64>(sql), params);
        Ok(query.fetch_one(&self.pool).await?)
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("SQLite connection pool closed");
    }
}

/// An open transaction.
///
/// Statements run in the order they are awaited. Dropping a unit of work
/// without committing rolls it back.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    /// Run one statement and return the affected row count.
    pub async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64, StoreError> {
        let query = bind_params!(sqlx::query(sql), params);
        Ok(query.execute(&mut *self.tx).await?.rows_affected())
    }

    /// Fetch the first column of every row as an integer.
    pub async fn fetch_integers(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<i64>, StoreError> {
        let query = bind_params!(sqlx::query_scalar::<_, i64>(sql), params);
        Ok(query.fetch_all(&mut *self.tx).await?)
    }

    /// Fetch the first column of every row as text.
    pub async fn fetch_texts(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<String>, StoreError> {
        let query = bind_params!(sqlx::query_scalar::<_, String>(sql), params);
        Ok(query.fetch_all(&mut *self.tx).await?)
    }

    /// Make every statement of this unit durable.
    ///
    /// Every statement already succeeded when this is called, so a rejected
    /// commit (a deferred constraint, a failed journal write) is a store
    /// fault and reported as [`StoreError::Query`]. Connection failures keep
    /// their class.
    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(|err| match StoreError::from(err) {
            StoreError::Connection(msg) => StoreError::Connection(msg),
            other => StoreError::Query(format!("commit failed: {other}")),
        })
    }

    /// Discard every statement of this unit.
    pub async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
