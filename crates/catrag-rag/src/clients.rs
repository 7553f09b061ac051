use std::sync::Arc;

use anyhow::Result;

use catrag_core::config::Settings;
use catrag_core::traits::{ChatModel, Embedder};

/// Service handles built once at startup and shared by the builder and the
/// query service.
#[derive(Clone)]
pub struct Clients {
    pub embedder: Arc<dyn Embedder>,
    pub chat: Arc<dyn ChatModel>,
}

impl Clients {
    pub fn new(embedder: Arc<dyn Embedder>, chat: Arc<dyn ChatModel>) -> Self {
        Self { embedder, chat }
    }

    /// Hosted clients from `settings`, honoring the offline switches.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            embedder: catrag_embed::get_default_embedder(settings)?,
            chat: catrag_llm::get_default_chat_model(settings)?,
        })
    }
}
