use sqlx::mysql::MySqlConnectOptions;
use std::fmt;
use thiserror::Error;

pub const ENV_USER: &str = "MYSQL_USER";
pub const ENV_PASSWORD: &str = "MYSQL_PASSWORD";
pub const ENV_HOST: &str = "MYSQL_HOST";
pub const ENV_PORT: &str = "MYSQL_PORT";
pub const ENV_DATABASE: &str = "MYSQL_DATABASE";

pub const DEFAULT_HOST: &str = "mysql-56";
pub const DEFAULT_PORT: u16 = 3306;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("MYSQL_PORT={0:?} is not a valid port")]
    InvalidPort(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct MysqlConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl MysqlConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get(ENV_PORT) {
            Some(p) => p.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            user: required(ENV_USER)?,
            password: required(ENV_PASSWORD)?,
            host: get(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database: required(ENV_DATABASE)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for MysqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}
