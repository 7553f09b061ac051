//! One category's on-disk index: the `chunks` table plus the `sources` ledger.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow_array::{Array, FixedSizeListArray, Int32Array, RecordBatch, RecordBatchIterator, StringArray, TimestampMillisecondArray};
use chrono::Utc;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::Connection;
use tracing::debug;

use catrag_core::types::{DocumentChunk, RetrievedChunk};

use crate::schema::{build_chunks_schema, build_sources_schema, CHUNKS_TABLE, SOURCES_TABLE};
use crate::table::{add_or_create, has_table, open_db, scores, sql_literal, string_column};

const INSERT_BATCH: usize = 1000;

/// Ledger row for a source file that has been embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub source: String,
    pub content_hash: String,
    pub chunk_count: usize,
}

pub struct CategoryIndex {
    db: Connection,
    path: PathBuf,
}

impl CategoryIndex {
    /// True when `path` holds a searchable index. Never creates anything.
    pub async fn exists(path: &Path) -> Result<bool> {
        if !path.is_dir() {
            return Ok(false);
        }
        let db = open_db(&path.to_string_lossy()).await?;
        has_table(&db, CHUNKS_TABLE).await
    }

    /// Connect to the index at `path`. The directory is created on first write.
    pub async fn open(path: &Path) -> Result<Self> {
        let db = open_db(&path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open index at {}", path.display()))?;
        Ok(Self { db, path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn count_rows(&self) -> Result<usize> {
        if !has_table(&self.db, CHUNKS_TABLE).await? {
            return Ok(0);
        }
        Ok(self.db.open_table(CHUNKS_TABLE).execute().await?.count_rows(None).await?)
    }

    /// Append chunks with their vectors. Creates the table on first use.
    pub async fn append(&self, chunks: &[DocumentChunk], embeddings: &[Vec<f32>]) -> Result<()> {
        anyhow::ensure!(
            chunks.len() == embeddings.len(),
            "{} chunks but {} embeddings",
            chunks.len(),
            embeddings.len()
        );
        let Some(dim) = embeddings.first().map(Vec::len) else {
            return Ok(());
        };
        anyhow::ensure!(embeddings.iter().all(|e| e.len() == dim), "embeddings have mixed dimensions");
        for (batch_chunks, batch_vecs) in chunks.chunks(INSERT_BATCH).zip(embeddings.chunks(INSERT_BATCH)) {
            let batch = chunks_to_record_batch(batch_chunks, batch_vecs, dim)?;
            add_or_create(&self.db, CHUNKS_TABLE, batch).await?;
            debug!(rows = batch_chunks.len(), index = %self.path.display(), "appended chunk batch");
        }
        Ok(())
    }

    /// Remove every chunk that came from `source`.
    pub async fn delete_source(&self, source: &str) -> Result<()> {
        if !has_table(&self.db, CHUNKS_TABLE).await? {
            return Ok(());
        }
        let table = self.db.open_table(CHUNKS_TABLE).execute().await?;
        table.delete(&format!("source = {}", sql_literal(source))).await?;
        Ok(())
    }

    /// Nearest `k` chunks to `query`, closest first.
    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<RetrievedChunk>> {
        let table = self.db.open_table(CHUNKS_TABLE).execute().await?;
        let mut stream = table.vector_search(query.to_vec())?.limit(k).execute().await?;
        let mut hits = Vec::new();
        while let Some(batch) = stream.try_next().await? {
            let ids = string_column(&batch, "id")?;
            let sources = string_column(&batch, "source")?;
            let contents = string_column(&batch, "content")?;
            for (i, score) in scores(&batch).into_iter().enumerate() {
                hits.push(RetrievedChunk {
                    id: ids.value(i).to_string(),
                    source: sources.value(i).to_string(),
                    content: contents.value(i).to_string(),
                    score,
                });
            }
        }
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }

    /// Ledger contents keyed by source path.
    pub async fn sources(&self) -> Result<HashMap<String, SourceRecord>> {
        let mut out = HashMap::new();
        if !has_table(&self.db, SOURCES_TABLE).await? {
            return Ok(out);
        }
        let table = self.db.open_table(SOURCES_TABLE).execute().await?;
        let mut stream = table.query().execute().await?;
        while let Some(batch) = stream.try_next().await? {
            let sources = string_column(&batch, "source")?;
            let hashes = string_column(&batch, "content_hash")?;
            let counts = batch
                .column_by_name("chunk_count")
                .and_then(|c| c.as_any().downcast_ref::<Int32Array>())
                .ok_or_else(|| anyhow::anyhow!("chunk_count column missing"))?;
            for i in 0..batch.num_rows() {
                let record = SourceRecord {
                    source: sources.value(i).to_string(),
                    content_hash: hashes.value(i).to_string(),
                    chunk_count: counts.value(i).max(0) as usize,
                };
                out.insert(record.source.clone(), record);
            }
        }
        Ok(out)
    }

    /// Upsert ledger rows, keyed by `source`.
    pub async fn record_sources(&self, records: &[SourceRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let chunk_counts = records.iter().map(|r| to_i32(r.chunk_count, "chunk_count")).collect::<Result<Vec<_>>>()?;
        let now = Utc::now().timestamp_millis();
        let schema = build_sources_schema();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.source.as_str()))),
                Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.content_hash.as_str()))),
                Arc::new(Int32Array::from(chunk_counts)),
                Arc::new(TimestampMillisecondArray::from(vec![now; records.len()])),
            ],
        )?;
        if !has_table(&self.db, SOURCES_TABLE).await? {
            return add_or_create(&self.db, SOURCES_TABLE, batch).await;
        }
        let table = self.db.open_table(SOURCES_TABLE).execute().await?;
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
        let mut mi = table.merge_insert(&["source"]);
        mi.when_matched_update_all(None).when_not_matched_insert_all();
        mi.execute(reader).await?;
        Ok(())
    }
}

fn chunks_to_record_batch(chunks: &[DocumentChunk], embeddings: &[Vec<f32>], dim: usize) -> Result<RecordBatch> {
    let dim = i32::try_from(dim).context("embedding dimension does not fit the schema")?;
    let chunk_indexes = chunks.iter().map(|c| to_i32(c.chunk_index, "chunk_index")).collect::<Result<Vec<_>>>()?;
    let totals = chunks.iter().map(|c| to_i32(c.total_chunks, "total_chunks")).collect::<Result<Vec<_>>>()?;
    let vectors = embeddings.iter().map(|v| Some(v.iter().copied().map(Some).collect::<Vec<_>>()));
    Ok(RecordBatch::try_new(
        build_chunks_schema(dim),
        vec![
            Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.id.as_str()))),
            Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.source.as_str()))),
            Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.category.as_str()))),
            Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.content_type.as_str()))),
            Arc::new(StringArray::from_iter_values(chunks.iter().map(|c| c.content.as_str()))),
            Arc::new(Int32Array::from(chunk_indexes)),
            Arc::new(Int32Array::from(totals)),
            Arc::new(FixedSizeListArray::from_iter_primitive::<arrow_array::types::Float32Type, _, _>(vectors, dim)),
        ],
    )?)
}

fn to_i32(value: usize, column: &str) -> Result<i32> {
    i32::try_from(value).with_context(|| format!("{column} {value} does not fit an Int32 column"))
}
