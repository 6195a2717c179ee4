//! OpenAI completion client for standard and OpenAI-compatible APIs.

use async_openai::config::OpenAIConfig as ClientConfig;
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use finsight_core::{CompletionModel, FinsightError, OpenAiConfig, Result};
use tracing::debug;

/// A [`CompletionModel`] backed by the chat completions API.
///
/// Honors the base-url override in [`OpenAiConfig`], so it works against
/// any OpenAI-compatible endpoint.
pub struct OpenAiCompletionModel {
    client: Client<ClientConfig>,
    model: String,
}

impl OpenAiCompletionModel {
    /// Create a new client from credential configuration.
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(FinsightError::Config("API key must not be empty".into()));
        }

        let mut client_config = ClientConfig::new().with_api_key(&config.api_key);
        if let Some(base_url) = &config.base_url {
            client_config = client_config.with_api_base(base_url);
        }

        Ok(Self { client: Client::with_config(client_config), model: config.model.clone() })
    }
}

#[async_trait]
impl CompletionModel for OpenAiCompletionModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        debug!(model = %self.model, temperature, prompt_len = prompt.len(), "completion request");

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| FinsightError::Completion {
                provider: "OpenAI".into(),
                message: format!("failed to build message: {e}"),
            })?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([message.into()])
            .temperature(temperature)
            .build()
            .map_err(|e| FinsightError::Completion {
                provider: "OpenAI".into(),
                message: format!("failed to build request: {e}"),
            })?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            FinsightError::Completion {
                provider: "OpenAI".into(),
                message: format!("API error: {e}"),
            }
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| FinsightError::Completion {
                provider: "OpenAI".into(),
                message: "API returned no completion".into(),
            })
    }
}
