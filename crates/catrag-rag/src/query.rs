use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use catrag_core::config::Settings;
use catrag_core::traits::{ChatModel, Embedder};
use catrag_core::types::RetrievedChunk;
use catrag_core::{Category, PromptTemplate};
use catrag_vector::CategoryIndex;

use crate::clients::Clients;

/// Returned in place of an answer when a category has not been built yet.
pub fn index_not_found_message(category: Category) -> String {
    format!("❌ No index found for {category}. Please build it first.")
}

#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub answer: String,
    /// Chunks that were put into the prompt, closest first.
    pub context: Vec<RetrievedChunk>,
}

pub struct QueryService {
    embedder: Arc<dyn Embedder>,
    chat: Arc<dyn ChatModel>,
    index_root: PathBuf,
    top_k: usize,
    template: PromptTemplate,
}

impl QueryService {
    pub fn new(settings: &Settings, clients: &Clients) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            embedder: clients.embedder.clone(),
            chat: clients.chat.clone(),
            index_root: settings.index_root(),
            top_k: settings.query.top_k,
            template: settings.prompt_template()?,
        })
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Answer text only. A missing index yields the not-found message.
    pub async fn answer(&self, category: Category, question: &str) -> Result<String> {
        Ok(self.ask(category, question).await?.answer)
    }

    pub async fn ask(&self, category: Category, question: &str) -> Result<QueryOutcome> {
        let Some(context) = self.retrieve(category, question).await? else {
            info!("no index for {}", category);
            return Ok(QueryOutcome { answer: index_not_found_message(category), context: Vec::new() });
        };
        let joined = context.iter().map(|c| c.content.as_str()).collect::<Vec<_>>().join("\n\n");
        let prompt = self.template.render(&joined, question);
        debug!(category = %category, chunks = context.len(), prompt_chars = prompt.chars().count(), "prompting chat model");
        let answer = self
            .chat
            .complete(&prompt)
            .await
            .with_context(|| format!("chat model {} failed", self.chat.model_id()))?;
        Ok(QueryOutcome { answer, context })
    }

    /// Top-k chunks for `question`, or `None` when the category has no index.
    pub async fn retrieve(&self, category: Category, question: &str) -> Result<Option<Vec<RetrievedChunk>>> {
        let index_dir = category.index_dir(&self.index_root);
        if !CategoryIndex::exists(&index_dir).await? {
            return Ok(None);
        }
        let index = CategoryIndex::open(&index_dir).await?;
        let query_vec = self
            .embedder
            .embed_batch(&[question.to_string()])
            .await
            .with_context(|| format!("embedder {} failed", self.embedder.embedder_id()))?
            .into_iter()
            .next()
            .context("embedder returned no vector for the question")?;
        let hits = index.search(&query_vec, self.top_k).await?;
        info!("🔍 Retrieved {} chunks from {}", hits.len(), category);
        Ok(Some(hits))
    }
}
