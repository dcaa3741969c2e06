use std::collections::HashMap;
use xinsert_store::config::{DEFAULT_HOST, DEFAULT_PORT};
use xinsert_store::{ConfigError, MySqlSession, MysqlConfig, StoreError};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn defaults_apply_to_host_and_port() {
    let cfg = MysqlConfig::from_lookup(lookup(&[
        ("MYSQL_USER", "root"),
        ("MYSQL_PASSWORD", "secret"),
        ("MYSQL_DATABASE", "demo"),
    ]))
    .unwrap();
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.addr(), "mysql-56:3306");
}

#[test]
fn explicit_values_win() {
    let cfg = MysqlConfig::from_lookup(lookup(&[
        ("MYSQL_USER", "app"),
        ("MYSQL_PASSWORD", "pw"),
        ("MYSQL_DATABASE", "demo"),
        ("MYSQL_HOST", "127.0.0.1"),
        ("MYSQL_PORT", "3307"),
    ]))
    .unwrap();
    assert_eq!(cfg.user, "app");
    assert_eq!(cfg.addr(), "127.0.0.1:3307");
}

#[test]
fn missing_required_values_fail() {
    let err = MysqlConfig::from_lookup(lookup(&[
        ("MYSQL_USER", "root"),
        ("MYSQL_DATABASE", "demo"),
    ]))
    .unwrap_err();
    assert_eq!(err, ConfigError::Missing("MYSQL_PASSWORD"));

    let err = MysqlConfig::from_lookup(lookup(&[
        ("MYSQL_USER", "root"),
        ("MYSQL_PASSWORD", "pw"),
        ("MYSQL_DATABASE", ""),
    ]))
    .unwrap_err();
    assert_eq!(err, ConfigError::Missing("MYSQL_DATABASE"));
}

#[test]
fn bad_port_fails() {
    let err = MysqlConfig::from_lookup(lookup(&[
        ("MYSQL_USER", "root"),
        ("MYSQL_PASSWORD", "pw"),
        ("MYSQL_DATABASE", "demo"),
        ("MYSQL_PORT", "70000"),
    ]))
    .unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort("70000".into()));
}

#[test]
fn debug_hides_password() {
    let cfg = MysqlConfig::from_lookup(lookup(&[
        ("MYSQL_USER", "root"),
        ("MYSQL_PASSWORD", "hunter2"),
        ("MYSQL_DATABASE", "demo"),
    ]))
    .unwrap();
    assert!(!format!("{cfg:?}").contains("hunter2"));
}

#[tokio::test]
async fn session_reports_missing_config_before_connecting() {
    let err = MySqlSession::connect_from(lookup(&[("MYSQL_PASSWORD", "pw")]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Config(ConfigError::Missing("MYSQL_USER"))
    ));
}
