//! xinsert_store: the MySQL side of the demo.
//! - Environment configuration and the pooled session
//! - The fixed demo table and its DDL
//! - Batch inserts and the decoded read-back

pub mod config;
pub mod drivers;
pub mod error;
pub mod ops;
pub mod table;

pub use config::{ConfigError, MysqlConfig};
pub use drivers::mysql::MySqlSession;
pub use drivers::{Database, ExecResult, InsertOutcome, ResultSet};
pub use error::StoreError;
pub use ops::{BatchIssuer, ReadBackReport, count_rows, create_table, drop_table, read_back};
pub use table::{DEFAULT_TABLE, DemoTable, ROWS_PER_BATCH, Schema};
