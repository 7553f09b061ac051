use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use twox_hash::XxHash64;

use catrag_core::traits::Embedder;

/// Offline embedder: hashed bag of lowercase words, L2-normalized.
///
/// Texts that share words land close together, which is enough for tests and
/// for running the pipeline without network access.
pub struct FakeEmbedder {
    dim: usize,
    id: String,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        let dim = dim.max(1);
        Self { dim, id: format!("fake:xxhash64:d{dim}") }
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        let words = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase);
        for word in words {
            let mut hasher = XxHash64::with_seed(0);
            word.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            v[idx] += 0.5 + ((h >> 32) as u32) as f32 / u32::MAX as f32;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn shared_words_are_closer() {
        let e = FakeEmbedder::new(256);
        let q = e.embed_text("Which report covers leave policy?");
        let hit = e.embed_text(r#"{"reportName":"Leave Policy","location":"India"}"#);
        let miss = e.embed_text(r#"{"reportName":"Quarterly Revenue","location":"Berlin"}"#);
        assert!(cosine(&q, &hit) > cosine(&q, &miss));
    }

    #[test]
    fn blank_text_is_the_zero_vector() {
        let v = FakeEmbedder::new(8).embed_text("  ");
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
