// src/gateway.rs
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, instrument, warn};

use crate::models::notice::Notices;
use crate::models::row::Row;
use crate::models::user::UserProfile;
use crate::store::{StoreError, TableStore};

pub const PROFILES_TABLE: &str = "perfiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WriteOp::Insert => "insert into",
            WriteOp::Update => "update",
            WriteOp::Delete => "delete from",
        })
    }
}

/// A failed insert, update or delete. The interaction that caused it is aborted.
#[derive(Debug, Error)]
#[error("Failed to {op} {table}: {source}")]
pub struct WriteError {
    pub op: WriteOp,
    pub table: String,
    #[source]
    pub source: StoreError,
}

/// Façade over the table store with the user-facing failure policy:
/// reads degrade to an empty result plus an error notice, writes report
/// and propagate, and the login lookup never fails.
#[derive(Clone)]
pub struct DataGateway {
    store: Arc<dyn TableStore>,
}

impl DataGateway {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, filters, notices))]
    pub async fn fetch(&self, table: &str, filters: Option<&Row>, notices: &mut Notices) -> Vec<Row> {
        let empty = Row::new();
        match self.store.select(table, filters.unwrap_or(&empty)).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(?e, "Failed to fetch rows");
                notices.error(format!("Error fetching data from {table}: {e}"));
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, row))]
    pub async fn insert(&self, table: &str, row: &Row) -> Result<Row, WriteError> {
        self.store
            .insert(table, row)
            .await
            .map_err(|source| write_failed(WriteOp::Insert, table, source))
    }

    #[instrument(skip(self, row))]
    pub async fn update(&self, table: &str, row: &Row, id: i64) -> Result<u64, WriteError> {
        self.store
            .update(table, row, id)
            .await
            .map_err(|source| write_failed(WriteOp::Update, table, source))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, table: &str, id: i64) -> Result<u64, WriteError> {
        self.store
            .delete(table, id)
            .await
            .map_err(|source| write_failed(WriteOp::Delete, table, source))
    }

    /// First profile with the given username. Lookup failures read as absent.
    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> Option<UserProfile> {
        let mut filters = Row::new();
        filters.insert("usuario".into(), Value::from(username));
        match self.store.select(PROFILES_TABLE, &filters).await {
            Ok(rows) => rows.first().map(UserProfile::from_row),
            Err(e) => {
                warn!(?e, "Profile lookup failed");
                None
            }
        }
    }

    /// All profiles, for the login scan. Failures read as an empty table.
    pub(crate) async fn profiles(&self) -> Vec<UserProfile> {
        match self.store.select(PROFILES_TABLE, &Row::new()).await {
            Ok(rows) => rows.iter().map(UserProfile::from_row).collect(),
            Err(e) => {
                warn!(?e, "Profile scan failed");
                Vec::new()
            }
        }
    }
}

fn write_failed(op: WriteOp, table: &str, source: StoreError) -> WriteError {
    error!(error = %source, %op, table, "Write failed");
    WriteError { op, table: table.to_string(), source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn gateway() -> (Arc<MemoryStore>, DataGateway) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), DataGateway::new(store))
    }

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn fetch_failure_is_empty_with_notice() {
        let (store, gw) = gateway();
        gw.insert("productos", &row(json!({ "nombre": "a" }))).await.unwrap();
        store.set_offline(true);

        let mut notices = Notices::new();
        let rows = gw.fetch("productos", None, &mut notices).await;
        assert!(rows.is_empty());
        assert!(notices.has_errors());
        let message = &notices.iter().next().unwrap().message;
        assert!(message.contains("productos"));
    }

    #[tokio::test]
    async fn fetch_applies_filters() {
        let (_, gw) = gateway();
        gw.insert("ventas", &row(json!({ "producto_id": 1 }))).await.unwrap();
        gw.insert("ventas", &row(json!({ "producto_id": 2 }))).await.unwrap();

        let mut notices = Notices::new();
        let filters = row(json!({ "producto_id": 2 }));
        let rows = gw.fetch("ventas", Some(&filters), &mut notices).await;
        assert_eq!(rows.len(), 1);
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn write_failures_propagate() {
        let (store, gw) = gateway();
        store.set_offline(true);
        let err = gw.insert("productos", &row(json!({ "nombre": "a" }))).await.unwrap_err();
        assert_eq!(err.op, WriteOp::Insert);
        assert!(err.to_string().starts_with("Failed to insert into productos"));
        assert!(gw.update("productos", &row(json!({ "nombre": "b" })), 1).await.is_err());
        assert!(gw.delete("productos", 1).await.is_err());
    }

    #[tokio::test]
    async fn get_user_never_fails() {
        let (store, gw) = gateway();
        gw.insert(PROFILES_TABLE, &row(json!({ "usuario": "ana", "clave": "1", "rol": "master_it" })))
            .await
            .unwrap();
        assert_eq!(gw.get_user("ana").await.map(|p| p.rol), Some("master_it".to_string()));
        assert!(gw.get_user("luis").await.is_none());
        store.set_offline(true);
        assert!(gw.get_user("ana").await.is_none());
    }
}
