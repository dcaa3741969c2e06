use crate::Command;
use anyhow::Context;
use tracing::info;
use xinsert_decode::{QUEUE_CAPACITY, RowDispatcher, delivery_queue, spawn_consumer};
use xinsert_store::{
    BatchIssuer, DEFAULT_TABLE, DemoTable, MySqlSession, Schema, create_table,
    drop_table, read_back,
};

pub async fn run(command: Command) -> anyhow::Result<()> {
    let db = MySqlSession::connect_from_env()
        .await
        .context("connecting to MySQL")?;

    let res = match command {
        Command::Setup { schema } => setup(&db, schema.into()).await,
        Command::Cleanup => cleanup(&db).await,
        Command::Test1 => test1(&db).await,
        Command::Test2 { batches } => test2(&db, batches).await,
    };
    db.close().await;
    res
}

async fn setup(db: &MySqlSession, schema: Schema) -> anyhow::Result<()> {
    let table = DemoTable::new(DEFAULT_TABLE, schema)?;
    create_table(db, &table)
        .await
        .with_context(|| format!("creating table {}", table.name()))
}

async fn cleanup(db: &MySqlSession) -> anyhow::Result<()> {
    let table = DemoTable::default();
    drop_table(db, &table)
        .await
        .with_context(|| format!("dropping table {}", table.name()))
}

async fn test1(db: &MySqlSession) -> anyhow::Result<()> {
    let table = DemoTable::default();
    let outcomes = BatchIssuer::new(&table)
        .issue(db, 1)
        .await
        .context("inserting batch")?;
    info!("insert completed {outcomes:?}");
    Ok(())
}

async fn test2(db: &MySqlSession, batches: usize) -> anyhow::Result<()> {
    let table = DemoTable::default();
    BatchIssuer::new(&table)
        .issue(db, batches)
        .await
        .context("inserting batches")?;

    // The consumer is left running; whatever it has not drained by exit is lost.
    let (tx, rx) = delivery_queue(QUEUE_CAPACITY);
    let _consumer = spawn_consumer(rx);
    let mut dispatcher = RowDispatcher::with_sink(tx);

    let report = read_back(db, &table, &mut dispatcher)
        .await
        .with_context(|| format!("reading back {}", table.name()))?;
    let (produced, observed) = dispatcher
        .sink()
        .map(|s| (s.produced(), s.observed()))
        .unwrap_or_default();
    info!(
        "read back {} rows: produced {produced}, observed {observed}, unsupported {}",
        report.rows,
        dispatcher.unsupported()
    );
    Ok(())
}
