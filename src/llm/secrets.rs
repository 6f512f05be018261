use std::env;

use anyhow::{Context, Result, anyhow, bail};
use keyring::{Entry, Error as KeyringError};
use rpassword::read_password;

use crate::palette::Palette;

pub const API_KEY_ENV: &str = "SAENGGIBU_OPENAI_API_KEY";
const FALLBACK_API_KEY_ENV: &str = "OPENAI_API_KEY";

const SERVICE: &str = "com.saenggibu";
const USERNAME: &str = "openai:default";

/// Where the API key for this run comes from. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Asked for on the terminal, used for this session only.
    Interactive,
    /// Environment variable, then the local keyring.
    Store,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    Keyring,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Environment => "environment variable",
            ApiKeySource::Keyring => "local keyring",
        }
    }
}

impl KeySource {
    /// Resolves the key, or `None` when none was supplied.
    pub fn resolve(self) -> Result<Option<String>> {
        match self {
            KeySource::Interactive => {
                let key = prompt_for_api_key()?;
                Ok((!key.is_empty()).then_some(key))
            }
            KeySource::Store => Ok(resolve_configured_api_key()?.map(|(key, _source)| key)),
        }
    }
}

/// A single persisted secret.
pub trait SecretStore {
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, secret: &str) -> Result<()>;
    /// Returns `false` when there was nothing to delete.
    fn delete(&self) -> Result<bool>;
}

/// The OS credential store (Keychain, Credential Manager, kernel keyutils).
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
    username: String,
}

impl KeyringStore {
    pub fn new(service: &str, username: &str) -> Self {
        Self {
            service: service.to_string(),
            username: username.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, &self.username)
            .with_context(|| format!("Failed to open keyring entry {}", self.service))
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(SERVICE, USERNAME)
    }
}

impl SecretStore for KeyringStore {
    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(KeyringError::NoEntry) => Ok(None),
            Err(err) => Err(anyhow!(err)),
        }
    }

    fn set(&self, secret: &str) -> Result<()> {
        self.entry()?
            .set_password(secret)
            .context("Failed to store API key in the keyring")
    }

    fn delete(&self) -> Result<bool> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(true),
            Err(KeyringError::NoEntry) => Ok(false),
            Err(err) => Err(anyhow!(err)),
        }
    }
}

pub fn clear_api_key() -> Result<bool> {
    KeyringStore::default().delete()
}

pub fn prompt_for_api_key() -> Result<String> {
    eprintln!(
        "{} (https://platform.openai.com/account/api-keys)",
        Palette::paint(Palette::SUCCESS, "OpenAI API 키를 입력하세요")
    );
    eprintln!(
        "{}",
        Palette::dim("이번 실행에서만 사용되며 저장되지 않습니다.")
    );

    let input = read_password().context("Failed to read API key")?;
    // Make input safe for use in a header
    Ok(sanitize_key(&input))
}

pub fn store_api_key(api_key: &str) -> Result<()> {
    store_api_key_in(&KeyringStore::default(), api_key)
}

fn store_api_key_in(store: &impl SecretStore, api_key: &str) -> Result<()> {
    let trimmed = sanitize_key(api_key);

    if trimmed.is_empty() {
        bail!("Cannot store an empty API key");
    }
    store.set(&trimmed)
}

pub fn resolve_configured_api_key() -> Result<Option<(String, ApiKeySource)>> {
    if let Some(env_key) = load_env_api_key(|key| env::var(key).ok()) {
        return Ok(Some((env_key, ApiKeySource::Environment)));
    }

    if let Some(stored) = load_stored_api_key(&KeyringStore::default())? {
        return Ok(Some((stored, ApiKeySource::Keyring)));
    }

    Ok(None)
}

fn load_env_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    [API_KEY_ENV, FALLBACK_API_KEY_ENV]
        .into_iter()
        .filter_map(lookup)
        .map(|value| sanitize_key(&value))
        .find(|value| !value.is_empty())
}

fn load_stored_api_key(store: &impl SecretStore) -> Result<Option<String>> {
    Ok(store
        .get()?
        .map(|value| sanitize_key(&value))
        .filter(|value| !value.is_empty()))
}

fn sanitize_key(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}
