//! LanceDB connection helpers and column accessors.
use anyhow::{anyhow, Result};
use arrow_array::{Array, Float32Array, RecordBatch, RecordBatchIterator, RecordBatchReader, StringArray};
use lancedb::{connect, Connection};

pub async fn open_db(uri: &str) -> Result<Connection> {
    Ok(connect(uri).execute().await?)
}

pub async fn has_table(conn: &Connection, name: &str) -> Result<bool> {
    let names = conn.table_names().execute().await?;
    Ok(names.iter().any(|n| n == name))
}

/// Append `batch` to `name`, creating the table from it when absent.
pub async fn add_or_create(conn: &Connection, name: &str, batch: RecordBatch) -> Result<()> {
    let schema = batch.schema();
    let reader: Box<dyn RecordBatchReader + Send> =
        Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
    if has_table(conn, name).await? {
        conn.open_table(name).execute().await?.add(reader).execute().await?;
    } else {
        conn.create_table(name, reader).execute().await?;
    }
    Ok(())
}

/// Quote a string for use inside a LanceDB filter expression.
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub(crate) fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| anyhow!("{name} column missing"))
}

/// `1 - _distance` per row, or 0.0 when the engine did not report distances.
pub(crate) fn scores(batch: &RecordBatch) -> Vec<f32> {
    match batch.column_by_name("_distance").and_then(|c| c.as_any().downcast_ref::<Float32Array>()) {
        Some(d) => (0..d.len()).map(|i| 1.0 - d.value(i)).collect(),
        None => vec![0.0; batch.num_rows()],
    }
}
