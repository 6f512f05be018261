use anyhow::{Context, Result, anyhow};
use async_openai::{Client, config::OpenAIConfig};

use crate::config::Settings;

use super::completion::OpenAiBackend;
use super::secrets::{API_KEY_ENV, ApiKeySource, resolve_configured_api_key};

/// Builds a backend for the configured endpoint and model.
pub fn connect(settings: &Settings, api_key: &str) -> Result<OpenAiBackend> {
    let client = initialize_client(settings, api_key)?;
    Ok(OpenAiBackend::new(client, settings.model.clone()))
}

/// Key from the environment or keyring; the assessment flow requires one.
pub fn require_configured_api_key() -> Result<String> {
    let (key, _source) = resolve_configured_api_key()?.ok_or_else(missing_key_error)?;
    Ok(key)
}

pub async fn test_configured_api_key(settings: &Settings) -> Result<ApiKeySource> {
    let (key, source) = resolve_configured_api_key()?.ok_or_else(missing_key_error)?;
    let client = initialize_client(settings, &key)?;
    healthcheck_client(&client).await?;
    Ok(source)
}

fn missing_key_error() -> anyhow::Error {
    anyhow!(
        "No API key configured. Set {} or run `saenggibu llm key --set <KEY>`.",
        API_KEY_ENV
    )
}

fn initialize_client(settings: &Settings, api_key: &str) -> Result<Client<OpenAIConfig>> {
    let config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(settings.base_url()?);

    let client = Client::with_config(config);
    Ok(client)
}

async fn healthcheck_client(client: &Client<OpenAIConfig>) -> Result<()> {
    client
        .models()
        .list()
        .await
        .context("Failed to validate API key with the completion API")?;
    Ok(())
}
