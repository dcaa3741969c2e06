pub mod mysql;

use crate::error::StoreError;
use tracing::warn;
use xinsert_decode::{ColumnDescriptor, RawRow};

/// What the driver reports after a statement, before any conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<RawRow>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertOutcome {
    pub rows_affected: i64,
    pub last_insert_id: i64,
}

impl From<ExecResult> for InsertOutcome {
    /// Counts that do not fit an i64 are reported as 0 with a warning.
    fn from(res: ExecResult) -> Self {
        let rows_affected = i64::try_from(res.rows_affected).unwrap_or_else(|e| {
            warn!("error getting rows affected: {e}");
            0
        });
        let last_insert_id = i64::try_from(res.last_insert_id).unwrap_or_else(|e| {
            warn!("error getting lastInsertId: {e}");
            0
        });
        Self {
            rows_affected,
            last_insert_id,
        }
    }
}

/// Narrow execute/query surface the commands need from a connection.
#[allow(async_fn_in_trait)]
pub trait Database {
    async fn execute(&self, sql: &str) -> Result<ExecResult, StoreError>;
    async fn query(&self, sql: &str) -> Result<ResultSet, StoreError>;
}
