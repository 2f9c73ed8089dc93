pub mod error;
pub mod json;
pub mod openai;

use crate::prompt::PromptPair;

/// How the provider should shape its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    /// Free text, bounded token budget.
    Text,
    /// The provider's native "valid JSON object" mode.
    Json,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> &'static str;

    /// One request, one reply. Every failure class surfaces as the same `Err`.
    async fn complete(&self, prompt: &PromptPair, mode: CompletionMode) -> anyhow::Result<String>;
}
