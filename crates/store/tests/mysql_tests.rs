//! Live-server tests. They read the same MYSQL_* environment as the binary
//! and do nothing when MYSQL_DATABASE is unset.

use xinsert_decode::{DecodedValue, RowDispatcher};
use xinsert_store::{
    BatchIssuer, DemoTable, MySqlSession, ROWS_PER_BATCH, Schema, count_rows, create_table,
    drop_table, read_back,
};

async fn session() -> Option<MySqlSession> {
    if std::env::var("MYSQL_DATABASE").is_err() {
        eprintln!("MYSQL_DATABASE not set, skipping");
        return None;
    }
    Some(MySqlSession::connect_from_env().await.unwrap())
}

async fn fresh_table(db: &MySqlSession, name: &str, schema: Schema) -> DemoTable {
    let table = DemoTable::new(name, schema).unwrap();
    drop_table(db, &table).await.unwrap();
    create_table(db, &table).await.unwrap();
    table
}

#[tokio::test]
async fn cleanup_twice_is_harmless() {
    let Some(db) = session().await else { return };
    let table = DemoTable::new("xinsert_it_cleanup", Schema::Simple).unwrap();
    drop_table(&db, &table).await.unwrap();
    drop_table(&db, &table).await.unwrap();
}

#[tokio::test]
async fn insert_then_read_back() {
    let Some(db) = session().await else { return };
    let table = fresh_table(&db, "xinsert_it_roundtrip", Schema::AutoIncrement).await;

    let before = count_rows(&db, &table).await.unwrap();
    let outcomes = BatchIssuer::new(&table).issue(&db, 1).await.unwrap();
    assert_eq!(outcomes[0].rows_affected, ROWS_PER_BATCH);
    assert_eq!(count_rows(&db, &table).await.unwrap(), before + ROWS_PER_BATCH);

    let mut dispatcher = RowDispatcher::new();
    let report = read_back(&db, &table, &mut dispatcher).await.unwrap();
    assert_eq!(report.rows, 2);
    let mut labels: Vec<String> = report
        .values
        .iter()
        .map(|values| {
            assert!(values[1].is_unsupported(), "c2 decoded as {:?}", values[1]);
            match &values[2] {
                DecodedValue::Text(s) => s.clone(),
                other => panic!("c3 decoded as {other:?}"),
            }
        })
        .collect();
    labels.sort();
    assert_eq!(labels, vec!["test1", "test2"]);

    drop_table(&db, &table).await.unwrap();
}

#[tokio::test]
async fn ten_batches_on_auto_increment() {
    let Some(db) = session().await else { return };
    let table = fresh_table(&db, "xinsert_it_batches", Schema::AutoIncrement).await;

    let outcomes = BatchIssuer::new(&table).issue(&db, 10).await.unwrap();
    assert_eq!(outcomes.len(), 10);
    assert!(outcomes.iter().all(|o| o.rows_affected == ROWS_PER_BATCH));
    assert!(outcomes.windows(2).all(|w| w[0].last_insert_id < w[1].last_insert_id));
    assert_eq!(count_rows(&db, &table).await.unwrap(), 20);

    drop_table(&db, &table).await.unwrap();
}
