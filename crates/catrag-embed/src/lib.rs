use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;

use catrag_core::config::{env_flag, Settings};
use catrag_core::traits::Embedder;

mod fake;
mod openai;

pub use fake::FakeEmbedder;
pub use openai::OpenAiCompatEmbedder;

pub const FAKE_EMBEDDINGS_ENV: &str = "APP_USE_FAKE_EMBEDDINGS";

/// The hosted embedder described by `settings`, or the offline
/// [`FakeEmbedder`] when `APP_USE_FAKE_EMBEDDINGS` is set.
pub fn get_default_embedder(settings: &Settings) -> Result<Arc<dyn Embedder>> {
    if env_flag(FAKE_EMBEDDINGS_ENV) {
        info!("🧪 Using FakeEmbedder");
        return Ok(Arc::new(FakeEmbedder::new(settings.embedding.dimensions)));
    }
    let api_key = settings
        .api_key()
        .ok_or_else(|| anyhow!("no API key configured: set api_key, GOOGLE_API_KEY or GEMINI_API_KEY"))?;
    let embedder = OpenAiCompatEmbedder::new(&api_key, &settings.embedding)?;
    info!(model = %settings.embedding.model, dim = settings.embedding.dimensions, "🔌 Using hosted embeddings");
    Ok(Arc::new(embedder))
}
