use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Name and database-reported type of one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub declared_type: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// A value as the driver handed it back, before any declared-type dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Int(i64),
    UInt(u64),
    Text(String),
    Bytes(Vec<u8>),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Int(i)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(b: Vec<u8>) -> Self {
        RawValue::Bytes(b)
    }
}

/// One fetched row keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawRow {
    values: BTreeMap<String, RawValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column value; a repeated name replaces the earlier value.
    pub fn insert(&mut self, column: impl Into<String>, value: RawValue) {
        self.values.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.values.get(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Full-row rendering used for the per-row diagnostic line.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self.values))
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Text(String),
    Integer(i64),
    Binary(Vec<u8>),
    /// NULL in a text column; logged, never queued.
    Null { column: String },
    Unsupported { declared_type: String, column: String },
}

impl DecodedValue {
    /// Text and Integer values travel on the delivery queue; the rest are log-only.
    pub fn is_deliverable(&self) -> bool {
        matches!(self, DecodedValue::Text(_) | DecodedValue::Integer(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, DecodedValue::Unsupported { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DecodedValue::Text(_) => "text",
            DecodedValue::Integer(_) => "integer",
            DecodedValue::Binary(_) => "binary",
            DecodedValue::Null { .. } => "null",
            DecodedValue::Unsupported { .. } => "unsupported",
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Text(s) => write!(f, "{s}"),
            DecodedValue::Integer(i) => write!(f, "{i}"),
            DecodedValue::Binary(b) => {
                for byte in b {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            DecodedValue::Null { column } => write!(f, "<null in {column}>"),
            DecodedValue::Unsupported {
                declared_type,
                column,
            } => write!(f, "<unsupported {declared_type} in {column}>"),
        }
    }
}
