use async_trait::async_trait;

use catrag_core::traits::ChatModel;

/// Offline chat model that answers with the prompt it was given.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoChatModel;

#[async_trait]
impl ChatModel for EchoChatModel {
    fn model_id(&self) -> &str {
        "echo"
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(prompt.to_string())
    }
}
