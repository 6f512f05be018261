use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_openai::{Client, config::OpenAIConfig};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::CompletionError;
use crate::prompts::Prompt;

pub const TEMPERATURE: f32 = 0.7;

/// One request/response exchange with a chat completion endpoint.
///
/// Failures are final: nothing is retried.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiBackend {
    pub fn new(client: Client<OpenAIConfig>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

pub fn build_request(
    model: &str,
    prompt: &Prompt,
) -> Result<CreateChatCompletionRequest, CompletionError> {
    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .temperature(TEMPERATURE)
        .messages([
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user.as_str())
                .build()?
                .into(),
        ])
        .build()?;
    Ok(request)
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &Prompt) -> Result<String, CompletionError> {
        let request = build_request(&self.model, prompt)?;
        info!(
            model = %self.model,
            prompt_chars = prompt.user.chars().count(),
            "sending completion request"
        );

        let response = self.client.chat().create(request).await?;

        let output = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or(CompletionError::NoContent)?;
        debug!(reply_chars = output.chars().count(), "received completion");

        Ok(output)
    }
}
