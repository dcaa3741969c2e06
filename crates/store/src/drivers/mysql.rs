use super::{Database, ExecResult, ResultSet};
use crate::config::MysqlConfig;
use crate::error::StoreError;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Connection, Row, TypeInfo, ValueRef};
use tracing::{debug, info};
use xinsert_decode::{ColumnDescriptor, RawRow, RawValue};

/// One pooled MySQL connection, owned by the caller and passed to every operation.
#[derive(Clone, Debug)]
pub struct MySqlSession {
    pool: MySqlPool,
}

impl MySqlSession {
    /// Open the pool and ping the server before any statement runs.
    pub async fn connect(config: &MysqlConfig) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(config.connect_options())
            .await?;
        info!(
            "DB: {}@{}/{}",
            config.user,
            config.addr(),
            config.database
        );
        let mut conn = pool.acquire().await?;
        conn.ping().await?;
        Ok(Self { pool })
    }

    /// Resolve the configuration from `MYSQL_*` variables, then connect.
    pub async fn connect_from_env() -> Result<Self, StoreError> {
        Self::connect(&MysqlConfig::from_env()?).await
    }

    pub async fn connect_from<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = MysqlConfig::from_lookup(lookup)?;
        Self::connect(&config).await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Database for MySqlSession {
    async fn execute(&self, sql: &str) -> Result<ExecResult, StoreError> {
        debug!("execute: {sql}");
        let res = sqlx::query(sql).execute(&self.pool).await?;
        Ok(ExecResult {
            rows_affected: res.rows_affected(),
            last_insert_id: res.last_insert_id(),
        })
    }

    /// Buffers the whole result before returning. The demo table stays at a
    /// few thousand rows, so no streaming cursor is kept open.
    async fn query(&self, sql: &str) -> Result<ResultSet, StoreError> {
        debug!("query: {sql}");
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        let columns: Vec<ColumnDescriptor> = rows
            .first()
            .map(|r| {
                r.columns()
                    .iter()
                    .map(|c| ColumnDescriptor::new(c.name(), c.type_info().name()))
                    .collect()
            })
            .unwrap_or_default();

        let mut out_rows: Vec<RawRow> = Vec::with_capacity(rows.len());
        for r in rows.iter() {
            let mut raw = RawRow::new();
            for (i, c) in columns.iter().enumerate() {
                raw.insert(c.name.clone(), raw_value(r, i)?);
            }
            out_rows.push(raw);
        }
        Ok(ResultSet {
            columns,
            rows: out_rows,
        })
    }
}

/// Take whatever native shape the driver can produce for a column; the
/// declared type is not consulted here.
fn raw_value(row: &MySqlRow, i: usize) -> Result<RawValue, sqlx::Error> {
    if row.try_get_raw(i)?.is_null() {
        return Ok(RawValue::Null);
    }
    row.try_get::<i64, _>(i)
        .map(RawValue::Int)
        .or_else(|_| row.try_get::<u64, _>(i).map(RawValue::UInt))
        .or_else(|_| row.try_get::<String, _>(i).map(RawValue::Text))
        .or_else(|_| row.try_get_unchecked::<Vec<u8>, _>(i).map(RawValue::Bytes))
}
