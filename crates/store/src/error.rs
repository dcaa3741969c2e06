use crate::config::ConfigError;
use thiserror::Error;
use xinsert_decode::DecodeError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),
}
