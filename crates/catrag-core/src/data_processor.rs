//! Folder ingestion: enumerate a category folder, load every supported file
//! and split the loaded documents into chunks.
//!
//! Load failures never abort a folder; they are logged and reported back in
//! [`FolderLoad`].
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::category::Category;
use crate::fingerprint::content_hash;
use crate::loader::{source_of, LoaderRegistry};
use crate::splitter::{ChunkingConfig, TextSplitter};
use crate::types::{Document, DocumentChunk};

/// Documents loaded from one source file.
///
/// `source` is the file's path relative to the category folder. It keys the
/// fingerprint ledger and is stamped on every document, so moving or
/// respelling the data root does not make files look new.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub source: String,
    pub content_hash: String,
    pub documents: Vec<Document>,
}

#[derive(Debug, Default)]
pub struct FolderLoad {
    pub files_seen: usize,
    pub sources: Vec<LoadedSource>,
    pub unsupported: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl FolderLoad {
    pub fn document_count(&self) -> usize {
        self.sources.iter().map(|s| s.documents.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.document_count() == 0
    }
}

#[derive(Default)]
pub struct DataProcessor {
    loaders: LoaderRegistry,
    splitter: TextSplitter,
}

impl DataProcessor {
    pub fn new(chunking: ChunkingConfig) -> Self {
        Self { loaders: LoaderRegistry::default(), splitter: TextSplitter::new(chunking) }
    }

    /// Load every supported file directly inside `dir` (no recursion).
    pub fn load_folder(&self, dir: &Path) -> FolderLoad {
        let mut load = FolderLoad::default();
        if !dir.is_dir() {
            warn!(folder = %dir.display(), "⚠️ Source folder does not exist");
            return load;
        }
        let files = self.list_files(dir);
        load.files_seen = files.len();
        for (file_index, path) in files.into_iter().enumerate() {
            let name = file_name(&path);
            let Some(loader) = self.loaders.find(&path) else {
                info!(file = %name, "skipping unsupported file");
                load.unsupported.push(path);
                continue;
            };
            debug!("Processing file {}/{}: {}", file_index + 1, load.files_seen, path.display());
            let loaded = fs::read(&path)
                .map_err(crate::error::Error::from)
                .and_then(|bytes| loader.load(&path).map(|docs| (content_hash(&bytes), docs)));
            match loaded {
                Ok((hash, mut documents)) => {
                    let source = path.strip_prefix(dir).map_or_else(|_| source_of(&path), source_of);
                    for doc in &mut documents {
                        doc.metadata.source.clone_from(&source);
                    }
                    load.sources.push(LoadedSource { source, path, content_hash: hash, documents });
                }
                Err(e) => {
                    warn!("⚠️ Could not load {}: {}", name, e);
                    load.failed.push((path, e.to_string()));
                }
            }
        }
        info!(
            "Loaded {} documents from {} of {} files in {}",
            load.document_count(),
            load.sources.len(),
            load.files_seen,
            dir.display()
        );
        load
    }

    pub fn chunk_documents(&self, category: Category, documents: &[Document]) -> Vec<DocumentChunk> {
        self.splitter.split_documents(category, documents)
    }

    fn list_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        files.sort();
        files
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}
