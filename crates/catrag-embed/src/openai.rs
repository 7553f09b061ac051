//! Embeddings over an OpenAI-compatible `/embeddings` endpoint.
//!
//! The default base URL is Google's OpenAI-compatible surface, so the same
//! client serves Gemini embedding models.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use catrag_core::config::EmbeddingSettings;
use catrag_core::traits::Embedder;

#[derive(Clone)]
pub struct OpenAiCompatEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    dim: usize,
    id: String,
}

impl OpenAiCompatEmbedder {
    pub fn new(api_key: &str, settings: &EmbeddingSettings) -> Result<Self> {
        anyhow::ensure!(!api_key.trim().is_empty(), "missing API key for the embedding service");
        anyhow::ensure!(!settings.model.trim().is_empty(), "missing embedding model name");
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key.trim())).context("invalid API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("failed to build embedding HTTP client")?;
        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
            dim: settings.dimensions,
            id: format!("{}:d{}", settings.model, settings.dimensions),
        })
    }
}

#[async_trait]
impl Embedder for OpenAiCompatEmbedder {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let request = EmbeddingRequest { model: &self.model, input: texts, dimensions: self.dim };
        debug!(count = texts.len(), model = %self.model, "requesting embeddings");
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("embedding request failed")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|_| "<body unavailable>".to_string());
            anyhow::bail!("embedding request failed ({}): {}", status, body);
        }
        let mut parsed: EmbeddingResponse = resp.json().await.context("failed to parse embedding response")?;
        parsed.data.sort_by_key(|entry| entry.index);
        anyhow::ensure!(
            parsed.data.len() == texts.len(),
            "embedding service returned {} vectors for {} inputs",
            parsed.data.len(),
            texts.len()
        );
        if let Some(bad) = parsed.data.iter().find(|e| e.embedding.len() != self.dim) {
            anyhow::bail!("embedding service returned dimension {}, expected {}", bad.embedding.len(), self.dim);
        }
        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingEntry>,
}

#[derive(Deserialize)]
struct EmbeddingEntry {
    index: usize,
    embedding: Vec<f32>,
}
