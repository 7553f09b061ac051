//! Batch index builder: one LanceDB index per category folder.
//!
//! With `builder.deduplicate` on, each source file's content hash is kept in
//! the index's `sources` ledger. Unchanged files are skipped, changed files
//! have their old chunks replaced, and files that disappeared from the folder
//! keep their chunks. With it off, every run appends everything it loads.
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use catrag_core::config::Settings;
use catrag_core::data_processor::DataProcessor;
use catrag_core::traits::Embedder;
use catrag_core::types::DocumentChunk;
use catrag_core::Category;
use catrag_vector::{CategoryIndex, SourceRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Nothing loadable in the folder; no index was touched.
    NoDocuments,
    Created,
    Updated,
    /// Every loaded source matched the ledger.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub category: Category,
    pub outcome: BuildOutcome,
    pub index_dir: PathBuf,
    pub files_seen: usize,
    pub files_loaded: usize,
    pub files_unsupported: usize,
    pub files_failed: usize,
    pub documents: usize,
    pub chunks_added: usize,
    pub chunks_removed: usize,
    pub sources_skipped: usize,
    pub sources_replaced: usize,
}

pub struct IndexBuilder {
    processor: DataProcessor,
    embedder: Arc<dyn Embedder>,
    data_root: PathBuf,
    index_root: PathBuf,
    deduplicate: bool,
    batch_size: usize,
    show_progress: bool,
}

struct PendingSource {
    record: SourceRecord,
    /// Chunk count of the ledger entry this source replaces.
    replaces: Option<usize>,
    chunks: Vec<DocumentChunk>,
}

impl IndexBuilder {
    pub fn new(settings: &Settings, embedder: Arc<dyn Embedder>) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            processor: DataProcessor::new(settings.chunking),
            embedder,
            data_root: settings.data_root(),
            index_root: settings.index_root(),
            deduplicate: settings.builder.deduplicate,
            batch_size: settings.embedding.batch_size.max(1),
            show_progress: false,
        })
    }

    /// Draw an embedding progress bar on stderr.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Build every category in order. The first embedding or storage error
    /// stops the run.
    pub async fn build_all(&self) -> Result<Vec<BuildReport>> {
        let mut reports = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            reports.push(self.build_category(category).await?);
        }
        Ok(reports)
    }

    pub async fn build_category(&self, category: Category) -> Result<BuildReport> {
        let source_dir = category.source_dir(&self.data_root);
        let index_dir = category.index_dir(&self.index_root);
        info!("📂 Building index for {} from {}", category, source_dir.display());

        let load = self.processor.load_folder(&source_dir);
        let mut report = BuildReport {
            category,
            outcome: BuildOutcome::NoDocuments,
            index_dir: index_dir.clone(),
            files_seen: load.files_seen,
            files_loaded: load.sources.len(),
            files_unsupported: load.unsupported.len(),
            files_failed: load.failed.len(),
            documents: load.document_count(),
            chunks_added: 0,
            chunks_removed: 0,
            sources_skipped: 0,
            sources_replaced: 0,
        };
        if load.is_empty() {
            warn!("⚠️ No documents found for {}; skipping", category);
            return Ok(report);
        }

        let existed = CategoryIndex::exists(&index_dir).await?;
        let ledger = if self.deduplicate && existed {
            CategoryIndex::open(&index_dir).await?.sources().await?
        } else {
            HashMap::new()
        };

        let mut pending = Vec::new();
        for loaded in &load.sources {
            let previous = ledger.get(&loaded.source);
            if previous.is_some_and(|p| p.content_hash == loaded.content_hash) {
                report.sources_skipped += 1;
                continue;
            }
            let chunks = self.processor.chunk_documents(category, &loaded.documents);
            pending.push(PendingSource {
                record: SourceRecord {
                    source: loaded.source.clone(),
                    content_hash: loaded.content_hash.clone(),
                    chunk_count: chunks.len(),
                },
                replaces: previous.map(|p| p.chunk_count),
                chunks,
            });
        }

        let chunks: Vec<DocumentChunk> = pending.iter().flat_map(|p| p.chunks.iter().cloned()).collect();
        if pending.is_empty() || (chunks.is_empty() && !existed) {
            report.outcome = if existed { BuildOutcome::Unchanged } else { BuildOutcome::NoDocuments };
            info!("✅ Index for {} is up to date", category);
            return Ok(report);
        }

        let embeddings = self.embed_chunks(&chunks).await.with_context(|| format!("failed to embed {category}"))?;

        if existed {
            info!("📌 Updating existing index for {}", category);
        } else {
            info!("🆕 Creating new index for {}", category);
        }
        let index = CategoryIndex::open(&index_dir).await?;
        for p in &pending {
            if let Some(old_chunks) = p.replaces {
                index.delete_source(&p.record.source).await?;
                report.sources_replaced += 1;
                report.chunks_removed += old_chunks;
            }
        }
        index.append(&chunks, &embeddings).await?;
        let records: Vec<SourceRecord> = pending.into_iter().map(|p| p.record).collect();
        index.record_sources(&records).await?;

        report.chunks_added = chunks.len();
        report.outcome = if existed { BuildOutcome::Updated } else { BuildOutcome::Created };
        info!(
            "✅ Index saved for {} at {} ({} chunks added, {} sources unchanged)",
            category,
            index_dir.display(),
            report.chunks_added,
            report.sources_skipped
        );
        Ok(report)
    }

    async fn embed_chunks(&self, chunks: &[DocumentChunk]) -> Result<Vec<Vec<f32>>> {
        let pb = if self.show_progress { ProgressBar::new(chunks.len() as u64) } else { ProgressBar::hidden() };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")?
                .progress_chars("#>-"),
        );
        let mut embeddings = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts).await?;
            anyhow::ensure!(
                vectors.len() == texts.len(),
                "embedder returned {} vectors for {} chunks",
                vectors.len(),
                texts.len()
            );
            embeddings.extend(vectors);
            pb.inc(batch.len() as u64);
        }
        pb.finish_with_message("embedded");
        Ok(embeddings)
    }
}
