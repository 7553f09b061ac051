use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{Error, Result};
use crate::fingerprint::chunk_fingerprint;
use crate::types::{Document, DocumentChunk};

/// Chunk size and overlap, both counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 1000, chunk_overlap: 100 }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunking.chunk_size must be greater than 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::InvalidConfig(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Fixed-window character splitter.
///
/// Windows of `chunk_size` characters advance by `chunk_size - chunk_overlap`,
/// so consecutive chunks share `chunk_overlap` characters. The last window
/// always ends at the end of the text.
#[derive(Debug, Clone, Default)]
pub struct TextSplitter {
    config: ChunkingConfig,
}

impl TextSplitter {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        // Byte offset of every char boundary, plus the end of the string.
        let bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
        let total = bounds.len() - 1;
        let size = self.config.chunk_size.max(1);
        let step = size.saturating_sub(self.config.chunk_overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + size).min(total);
            chunks.push(text[bounds[start]..bounds[end]].to_string());
            if end == total {
                break;
            }
            start += step;
        }
        chunks
    }

    /// Split every document and tag each chunk with its fingerprint.
    /// `chunk_index`/`total_chunks` are positions within the parent document.
    pub fn split_documents(&self, category: Category, documents: &[Document]) -> Vec<DocumentChunk> {
        let mut out = Vec::new();
        for doc in documents {
            let pieces = self.split_text(&doc.content);
            let total_chunks = pieces.len();
            for (chunk_index, content) in pieces.into_iter().enumerate() {
                out.push(DocumentChunk {
                    id: chunk_fingerprint(&doc.metadata.source, doc.metadata.seq, chunk_index, &content),
                    source: doc.metadata.source.clone(),
                    category: category.slug().to_string(),
                    content_type: doc.metadata.content_type.clone(),
                    content,
                    chunk_index,
                    total_chunks,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> TextSplitter {
        TextSplitter::new(ChunkingConfig { chunk_size, chunk_overlap })
    }

    #[test]
    fn empty_and_blank_text_yield_nothing() {
        let s = TextSplitter::default();
        assert!(s.split_text("").is_empty());
        assert!(s.split_text("   \n\n ").is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = TextSplitter::default().split_text("Leave policy for India.");
        assert_eq!(chunks, vec!["Leave policy for India.".to_string()]);
    }

    #[test]
    fn fifteen_hundred_chars_make_two_overlapping_chunks() {
        let text: String = (0..1500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = TextSplitter::default().split_text(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(chunks[1].chars().count(), 600);
        // second chunk starts inside the last 100 chars of the first
        assert_eq!(&chunks[0][900..], &chunks[1][..100]);
    }

    #[test]
    fn exact_multiple_has_no_redundant_tail() {
        let text = "x".repeat(1000);
        assert_eq!(TextSplitter::default().split_text(&text).len(), 1);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(15);
        let chunks = splitter(10, 2).split_text(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 10);
        assert_eq!(chunks[1].chars().count(), 7);
    }

    #[test]
    fn overlap_must_be_smaller_than_size() {
        assert!(ChunkingConfig { chunk_size: 100, chunk_overlap: 100 }.validate().is_err());
        assert!(ChunkingConfig { chunk_size: 0, chunk_overlap: 0 }.validate().is_err());
        assert!(ChunkingConfig::default().validate().is_ok());
    }

    #[test]
    fn split_documents_numbers_chunks_per_document() {
        let docs = vec![
            Document::new("a".repeat(25), "data/hr/a.txt", "text/plain", 1),
            Document::new("short", "data/hr/b.txt", "text/plain", 1),
        ];
        let chunks = splitter(10, 0).split_documents(Category::Hr, &docs);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[2].chunk_index, 2);
        assert_eq!(chunks[2].total_chunks, 3);
        assert_eq!(chunks[3].chunk_index, 0);
        assert_eq!(chunks[3].total_chunks, 1);
        assert!(chunks.iter().all(|c| c.category == "hr"));
    }
}
