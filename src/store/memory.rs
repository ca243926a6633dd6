// src/store/memory.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::{writable_columns, StoreError, TableStore};
use crate::models::row::Row;

/// Process-local store. Backs the `memory:` database URL and the tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    next_id: AtomicI64,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every operation fails with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn tables(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Row>>>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".into()));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }
}

fn matches(row: &Row, filters: &Row) -> bool {
    filters
        .iter()
        .all(|(key, expected)| row.get(key).unwrap_or(&Value::Null) == expected)
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(&self, table: &str, filters: &Row) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| matches(r, filters)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, table: &str, row: &Row) -> Result<Row, StoreError> {
        writable_columns(row)?;
        let mut tables = self.tables()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stored = row.clone();
        stored.insert("id".into(), Value::from(id));
        tables.entry(table.to_string()).or_default().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, table: &str, row: &Row, id: i64) -> Result<u64, StoreError> {
        let columns = writable_columns(row)?;
        let mut tables = self.tables()?;
        let target = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| r.get("id") == Some(&Value::from(id))));
        match target {
            Some(existing) => {
                for column in columns {
                    existing.insert(column.to_string(), row[column].clone());
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, table: &str, id: i64) -> Result<u64, StoreError> {
        let mut tables = self.tables()?;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| r.get("id") != Some(&Value::from(id)));
        Ok((before - rows.len()) as u64)
    }
}
