pub mod client;
pub mod completion;
pub mod provider;
pub mod secrets;

pub use client::{connect, require_configured_api_key, test_configured_api_key};
pub use completion::{CompletionBackend, OpenAiBackend, TEMPERATURE};
pub use secrets::{KeySource, clear_api_key, store_api_key};
