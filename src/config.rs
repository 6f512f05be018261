use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::llm::provider::get_llm_base_url;

pub const PROVIDER_ENV: &str = "SAENGGIBU_PROVIDER";
pub const MODEL_ENV: &str = "SAENGGIBU_MODEL";
pub const API_BASE_ENV: &str = "SAENGGIBU_API_BASE";

const DEFAULT_PROVIDER: &str = "openai";
const DEFAULT_MODEL: &str = "gpt-4";

/// Which completion endpoint and model to talk to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: String,
    pub model: String,
    /// Overrides the provider's base URL, e.g. for a self-hosted gateway.
    pub api_base: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: None,
        }
    }
}

impl Settings {
    /// Defaults, then `config.toml` from the platform config dir, then
    /// environment variables (a `.env` file in the working dir is honored).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut settings = match config_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        settings.apply_env(|key| env::var(key).ok());
        debug!(provider = %settings.provider, model = %settings.model, "loaded settings");
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());

        if let Some(provider) = non_blank(PROVIDER_ENV) {
            self.provider = provider;
        }
        if let Some(model) = non_blank(MODEL_ENV) {
            self.model = model;
        }
        if let Some(api_base) = non_blank(API_BASE_ENV) {
            self.api_base = Some(api_base);
        }
    }

    pub fn base_url(&self) -> Result<String> {
        if let Some(api_base) = &self.api_base {
            return Ok(api_base.trim().to_string());
        }
        get_llm_base_url(&self.provider)
            .ok_or_else(|| anyhow!("Unknown LLM provider `{}`", self.provider))
    }
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "saenggibu").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_to_openai_gpt4() {
        let settings = Settings::default();
        assert_eq!(settings.provider, "openai");
        assert_eq!(settings.model, "gpt-4");
        assert_eq!(settings.base_url().unwrap(), "https://api.openai.com/v1");
    }

    #[test]
    fn reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gpt-4o-mini\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.provider, "openai");
        assert_eq!(settings.api_base, None);
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = ").unwrap();
        assert!(Settings::from_file(file.path()).is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (PROVIDER_ENV, "ollama"),
            (MODEL_ENV, "llama3"),
            (API_BASE_ENV, "  "),
        ]);
        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.provider, "ollama");
        assert_eq!(settings.model, "llama3");
        assert_eq!(settings.api_base, None);
        assert_eq!(settings.base_url().unwrap(), "http://localhost:11434/v1");
    }

    #[test]
    fn api_base_wins_over_provider() {
        let settings = Settings {
            api_base: Some("http://gateway.local/v1".into()),
            provider: "nope".into(),
            ..Settings::default()
        };
        assert_eq!(settings.base_url().unwrap(), "http://gateway.local/v1");

        let unknown = Settings {
            provider: "nope".into(),
            ..Settings::default()
        };
        assert!(unknown.base_url().is_err());
    }
}
