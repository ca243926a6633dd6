// src/store/mod.rs
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::row::Row;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unknown table `{0}`")]
    UnknownTable(String),

    #[error("invalid column name `{0}`")]
    InvalidColumn(String),

    #[error("row has no columns to write")]
    EmptyRow,

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Row-level operations on named tables of the hosted store.
///
/// Rows are identified by an integer `id` column assigned by the store.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// All rows whose columns equal every entry in `filters`, in storage order.
    async fn select(&self, table: &str, filters: &Row) -> Result<Vec<Row>, StoreError>;

    /// Inserts a row and returns it as stored, including its `id`.
    async fn insert(&self, table: &str, row: &Row) -> Result<Row, StoreError>;

    /// Overwrites the given columns of the row with `id`; returns rows affected.
    async fn update(&self, table: &str, row: &Row, id: i64) -> Result<u64, StoreError>;

    /// Removes the row with `id`; returns rows affected.
    async fn delete(&self, table: &str, id: i64) -> Result<u64, StoreError>;
}

/// SQL identifiers are interpolated into statements, so only plain
/// lowercase snake_case names are accepted.
pub(crate) fn check_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && name.len() <= 63
}

/// Column names of a row to be written, excluding the store-assigned `id`.
pub(crate) fn writable_columns(row: &Row) -> Result<Vec<&str>, StoreError> {
    let mut columns = Vec::with_capacity(row.len());
    for key in row.keys() {
        if key == "id" {
            continue;
        }
        if !check_identifier(key) {
            return Err(StoreError::InvalidColumn(key.clone()));
        }
        columns.push(key.as_str());
    }
    if columns.is_empty() {
        return Err(StoreError::EmptyRow);
    }
    Ok(columns)
}
