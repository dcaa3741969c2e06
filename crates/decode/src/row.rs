use crate::dispatch::{DecodeError, decode_value};
use crate::queue::DeliverySender;
use crate::value::{ColumnDescriptor, DecodedValue, RawRow};
use tracing::{debug, info, warn};

/// Decode one row, yielding one value per descriptor in descriptor order.
pub fn decode_row(
    columns: &[ColumnDescriptor],
    row: &RawRow,
) -> Result<Vec<DecodedValue>, DecodeError> {
    let mismatch = || DecodeError::ColumnMismatch {
        expected: columns.iter().map(|c| c.name.clone()).collect(),
        row: row.columns().map(str::to_string).collect(),
    };
    if row.len() != columns.len() {
        return Err(mismatch());
    }

    columns
        .iter()
        .map(|c| {
            let raw = row.get(&c.name).ok_or_else(mismatch)?;
            decode_value(c, raw)
        })
        .collect()
}

/// Logs each row, decodes it, and forwards deliverable values to the queue.
#[derive(Debug, Default)]
pub struct RowDispatcher {
    sink: Option<DeliverySender>,
    rows: usize,
    unsupported: usize,
}

impl RowDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: DeliverySender) -> Self {
        Self {
            sink: Some(sink),
            ..Self::default()
        }
    }

    pub async fn dispatch(
        &mut self,
        columns: &[ColumnDescriptor],
        row: &RawRow,
    ) -> Result<Vec<DecodedValue>, DecodeError> {
        info!("row: {}", row.to_json());
        for (k, v) in row.iter() {
            debug!("k: {k}, v: {v:?}");
        }

        let decoded = decode_row(columns, row)?;
        for (column, value) in columns.iter().zip(&decoded) {
            match value {
                DecodedValue::Unsupported { .. } => {
                    self.unsupported += 1;
                    warn!(
                        "don't know how to deal with {} yet, column: {}",
                        column.declared_type, column.name
                    );
                }
                DecodedValue::Null { .. } => {
                    warn!("column {} ({}) is NULL", column.name, column.declared_type);
                }
                v if v.is_deliverable() => {
                    if let Some(sink) = &self.sink {
                        sink.deliver(v.clone()).await;
                    }
                }
                v => debug!("column {} decoded as {}, not queued", column.name, v.kind()),
            }
        }
        self.rows += 1;
        Ok(decoded)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn unsupported(&self) -> usize {
        self.unsupported
    }

    pub fn sink(&self) -> Option<&DeliverySender> {
        self.sink.as_ref()
    }
}
