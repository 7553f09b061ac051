use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;

use catrag_core::config::{env_flag, Settings};
use catrag_core::traits::ChatModel;

mod echo;
mod openai;

pub use echo::EchoChatModel;
pub use openai::OpenAiCompatChatModel;

pub const FAKE_LLM_ENV: &str = "APP_USE_FAKE_LLM";

/// The hosted chat model described by `settings`, or [`EchoChatModel`] when
/// `APP_USE_FAKE_LLM` is set.
pub fn get_default_chat_model(settings: &Settings) -> Result<Arc<dyn ChatModel>> {
    if env_flag(FAKE_LLM_ENV) {
        info!("🧪 Using EchoChatModel");
        return Ok(Arc::new(EchoChatModel));
    }
    let api_key = settings
        .api_key()
        .ok_or_else(|| anyhow!("no API key configured: set api_key, GOOGLE_API_KEY or GEMINI_API_KEY"))?;
    let model = OpenAiCompatChatModel::new(&api_key, &settings.chat)?;
    info!(model = %settings.chat.model, "🔌 Using hosted chat model");
    Ok(Arc::new(model))
}
