//! Domain types shared by the builder, the index and the query service.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// Where a loaded document came from.
///
/// - `source`: originating file path, relative to its category folder once
///   loaded through a category build
/// - `content_type`: mime-like label set by the loader
/// - `seq`: 1-based ordinal of the document inside its source (JSON record
///   number; always 1 for single-document formats)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: String,
    pub content_type: String,
    pub seq: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>, content_type: &str, seq: usize) -> Self {
        Self {
            content: content.into(),
            metadata: DocumentMetadata { source: source.into(), content_type: content_type.to_string(), seq },
        }
    }
}

/// A slice of a document that is embedded and indexed on its own.
///
/// `id` is the chunk fingerprint (see [`crate::fingerprint::chunk_fingerprint`]),
/// so identical chunks from the same place in the same source share an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: ChunkId,
    pub source: String,
    pub category: String,
    pub content_type: String,
    pub content: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// A chunk returned by similarity search. Higher `score` is closer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub id: ChunkId,
    pub source: String,
    pub content: String,
    pub score: f32,
}
