// src/store/postgres.rs
use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use tracing::{debug, instrument};

use super::{check_identifier, writable_columns, StoreError, TableStore};
use crate::models::row::Row;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// PostgreSQL-backed store. Rows travel as JSONB so any table of the
/// known set can be read and written without per-table queries.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    tables: HashSet<String>,
}

impl PgStore {
    pub fn new<I, S>(pool: PgPool, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pool,
            tables: tables.into_iter().map(Into::into).collect(),
        }
    }

    fn table<'a>(&self, table: &'a str) -> Result<&'a str, StoreError> {
        if self.tables.contains(table) && check_identifier(table) {
            Ok(table)
        } else {
            Err(StoreError::UnknownTable(table.to_string()))
        }
    }
}

#[async_trait]
impl TableStore for PgStore {
    #[instrument(skip(self, filters))]
    async fn select(&self, table: &str, filters: &Row) -> Result<Vec<Row>, StoreError> {
        let table = self.table(table)?;
        let sql = format!(
            "SELECT to_jsonb(t) FROM {table} t WHERE to_jsonb(t) @> $1::jsonb ORDER BY t.id"
        );
        let rows = sqlx::query_scalar::<_, Json<Row>>(&sql)
            .bind(Json(filters))
            .fetch_all(&self.pool)
            .await?;
        debug!(count = rows.len(), "selected rows");
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: &str, row: &Row) -> Result<Row, StoreError> {
        let table = self.table(table)?;
        let columns = writable_columns(row)?.join(", ");
        let sql = format!(
            "INSERT INTO {table} AS t ({columns})
             SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1::jsonb)
             RETURNING to_jsonb(t)"
        );
        let Json(stored) = sqlx::query_scalar::<_, Json<Row>>(&sql)
            .bind(Json(row))
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    #[instrument(skip(self, row))]
    async fn update(&self, table: &str, row: &Row, id: i64) -> Result<u64, StoreError> {
        let table = self.table(table)?;
        let assignments = writable_columns(row)?
            .into_iter()
            .map(|c| format!("{c} = r.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {table} AS t SET {assignments}
             FROM jsonb_populate_record(NULL::{table}, $1::jsonb) AS r
             WHERE t.id = $2"
        );
        let result = sqlx::query(&sql)
            .bind(Json(row))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, table: &str, id: i64) -> Result<u64, StoreError> {
        let table = self.table(table)?;
        let sql = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
