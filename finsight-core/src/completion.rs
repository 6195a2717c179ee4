//! Completion model trait for free-text generation.

use async_trait::async_trait;

use crate::error::Result;

/// A text-completion service accepting a prompt and returning a completion.
///
/// Implementations wrap specific providers (OpenAI, compatible endpoints,
/// mocks) behind a unified async interface. The `temperature` parameter is
/// passed through to the provider's sampling configuration.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// The provider or model name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Generate a completion for a single free-text prompt.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String>;
}
