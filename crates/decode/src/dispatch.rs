use crate::value::{ColumnDescriptor, DecodedValue, RawValue};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("row columns {row:?} do not match result columns {expected:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        row: Vec<String>,
    },
    #[error("column {column} ({declared_type}) holds {found}, not a 64-bit integer")]
    NotAnInteger {
        column: String,
        declared_type: String,
        found: String,
    },
}

pub type DecodeFn = fn(&ColumnDescriptor, &RawValue) -> Result<DecodedValue, DecodeError>;

pub const TEXT_TYPES: &[&str] = &["VARCHAR2", "VARCHAR", "CHAR", "TEXT", "NVARCHAR"];
pub const INTEGER_TYPES: &[&str] = &["DECIMAL", "SMALLINT", "INT", "BIGINT"];
/// Names we know about but do not decode yet.
pub const UNHANDLED_TYPES: &[&str] = &["BOOL", "[]BIGINT", "TIMESTAMP", "DATE", "JSONB", "XML"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Text,
    Integer,
    Unhandled,
    Unknown,
}

impl TypeFamily {
    pub fn classify(declared_type: &str) -> Self {
        let is = |set: &[&str]| set.iter().any(|t| t.eq_ignore_ascii_case(declared_type));
        if is(TEXT_TYPES) {
            TypeFamily::Text
        } else if is(INTEGER_TYPES) {
            TypeFamily::Integer
        } else if is(UNHANDLED_TYPES) {
            TypeFamily::Unhandled
        } else {
            TypeFamily::Unknown
        }
    }
}

const DISPATCH: &[(TypeFamily, DecodeFn)] = &[
    (TypeFamily::Text, decode_text),
    (TypeFamily::Integer, decode_integer),
];

/// Pick the decode function for a declared type; anything outside the table is unsupported.
pub fn decoder_for(declared_type: &str) -> DecodeFn {
    let family = TypeFamily::classify(declared_type);
    DISPATCH
        .iter()
        .find(|(f, _)| *f == family)
        .map(|(_, func)| *func)
        .unwrap_or(decode_unsupported)
}

pub fn decode_value(column: &ColumnDescriptor, raw: &RawValue) -> Result<DecodedValue, DecodeError> {
    decoder_for(&column.declared_type)(column, raw)
}

fn decode_text(column: &ColumnDescriptor, raw: &RawValue) -> Result<DecodedValue, DecodeError> {
    match raw {
        RawValue::Text(s) => Ok(DecodedValue::Text(s.clone())),
        RawValue::Bytes(b) => Ok(match std::str::from_utf8(b) {
            Ok(s) => DecodedValue::Text(s.to_string()),
            Err(_) => DecodedValue::Binary(b.clone()),
        }),
        RawValue::Int(i) => Ok(DecodedValue::Text(i.to_string())),
        RawValue::UInt(u) => Ok(DecodedValue::Text(u.to_string())),
        RawValue::Null => Ok(DecodedValue::Null {
            column: column.name.clone(),
        }),
    }
}

fn decode_integer(column: &ColumnDescriptor, raw: &RawValue) -> Result<DecodedValue, DecodeError> {
    let parsed = match raw {
        RawValue::Int(i) => Some(*i),
        RawValue::UInt(u) => i64::try_from(*u).ok(),
        RawValue::Text(s) => s.trim().parse::<i64>().ok(),
        RawValue::Bytes(b) => std::str::from_utf8(b)
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok()),
        RawValue::Null => None,
    };
    parsed.map(DecodedValue::Integer).ok_or_else(|| DecodeError::NotAnInteger {
        column: column.name.clone(),
        declared_type: column.declared_type.clone(),
        found: describe(raw),
    })
}

fn decode_unsupported(column: &ColumnDescriptor, _raw: &RawValue) -> Result<DecodedValue, DecodeError> {
    Ok(DecodedValue::Unsupported {
        declared_type: column.declared_type.clone(),
        column: column.name.clone(),
    })
}

fn describe(raw: &RawValue) -> String {
    match raw {
        RawValue::Null => "NULL".to_string(),
        RawValue::Int(i) => format!("int {i}"),
        RawValue::UInt(u) => format!("unsigned {u}"),
        RawValue::Text(s) => format!("text {s:?}"),
        RawValue::Bytes(b) => format!("{} bytes", b.len()),
    }
}
