use crate::drivers::{Database, InsertOutcome};
use crate::error::StoreError;
use crate::table::{DemoTable, ROWS_PER_BATCH};
use tracing::{info, warn};
use xinsert_decode::{DecodeError, DecodedValue, RowDispatcher, decode_row};

pub async fn create_table<D: Database>(db: &D, table: &DemoTable) -> Result<(), StoreError> {
    let res = db.execute(&table.create_sql()).await?;
    info!("created table {} ({:?}): {res:?}", table.name(), table.schema());
    Ok(())
}

/// Succeeds whether or not the table exists.
pub async fn drop_table<D: Database>(db: &D, table: &DemoTable) -> Result<(), StoreError> {
    let res = db.execute(&table.drop_sql()).await?;
    info!("drop table {}: {res:?}", table.name());
    Ok(())
}

/// Issues extended inserts against the demo table, one outcome per statement.
pub struct BatchIssuer<'a> {
    table: &'a DemoTable,
}

impl<'a> BatchIssuer<'a> {
    pub fn new(table: &'a DemoTable) -> Self {
        Self { table }
    }

    /// Run `batches` statements in order. The first failure aborts the rest.
    pub async fn issue<D: Database>(
        &self,
        db: &D,
        batches: usize,
    ) -> Result<Vec<InsertOutcome>, StoreError> {
        let sql = self.table.insert_batch_sql();
        let mut outcomes = Vec::with_capacity(batches);
        for _ in 0..batches {
            let outcome = InsertOutcome::from(db.execute(&sql).await?);
            info!(
                "inserted rowsAffected: {}, id: {}",
                outcome.rows_affected, outcome.last_insert_id
            );
            if outcome.rows_affected != ROWS_PER_BATCH {
                warn!(
                    "batch into {} affected {} rows, expected {ROWS_PER_BATCH}",
                    self.table.name(),
                    outcome.rows_affected
                );
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadBackReport {
    pub rows: usize,
    pub values: Vec<Vec<DecodedValue>>,
}

/// Select every row of the table and run each through the dispatcher.
pub async fn read_back<D: Database>(
    db: &D,
    table: &DemoTable,
    dispatcher: &mut RowDispatcher,
) -> Result<ReadBackReport, StoreError> {
    let result = db.query(&table.select_all_sql()).await?;
    for (i, c) in result.columns.iter().enumerate() {
        info!("coltype[{i}]: {} {}", c.name, c.declared_type);
    }

    let mut report = ReadBackReport::default();
    for row in &result.rows {
        let decoded = dispatcher.dispatch(&result.columns, row).await?;
        report.values.push(decoded);
        report.rows += 1;
    }
    Ok(report)
}

pub async fn count_rows<D: Database>(db: &D, table: &DemoTable) -> Result<i64, StoreError> {
    let result = db.query(&table.count_sql()).await?;
    let Some(row) = result.rows.first() else {
        warn!("count on {} returned no rows", table.name());
        return Ok(0);
    };
    match decode_row(&result.columns, row)?.first() {
        Some(DecodedValue::Integer(n)) => Ok(*n),
        other => {
            let (column, declared_type) = result
                .columns
                .first()
                .map(|c| (c.name.clone(), c.declared_type.clone()))
                .unwrap_or_default();
            Err(DecodeError::NotAnInteger {
                column,
                declared_type,
                found: format!("{other:?}"),
            }
            .into())
        }
    }
}
