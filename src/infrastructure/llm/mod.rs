//! LLM providers for commit-message generation
//!
//! Providers are looked up by name in [`AppConfig`] and built by [`create_provider`].

pub mod openai;

use thiserror::Error;
use validator::Validate;

use crate::common::config::AppConfig;

pub use openai::OpenAiProvider;

/// LLM provider related errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Unsupported LLM provider: {0}")]
    UnsupportedProvider(String),

    #[error("Provider '{0}' not configured.")]
    ProviderNotConfigured(String),

    #[error("Provider '{provider}' is misconfigured: {message}")]
    InvalidConfiguration { provider: String, message: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP Error: {status}, Response: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse JSON response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected response structure")]
    UnexpectedResponse,
}

/// Something that turns a diff into a commit message
#[cfg_attr(test, mockall::automock)]
pub trait CommitMessageProvider {
    /// `changes` holds one summary line per file, e.g. `Added src/lib.rs`
    fn generate_commit_message(&self, diff: &str, changes: &[String]) -> Result<String, LlmError>;
}

/// Build the provider registered under `name`
pub fn create_provider(
    name: &str,
    config: &AppConfig,
) -> Result<Box<dyn CommitMessageProvider>, LlmError> {
    let provider_config = config
        .provider(name)
        .ok_or_else(|| LlmError::ProviderNotConfigured(name.to_string()))?;

    match name {
        "openai" => {
            provider_config
                .validate()
                .map_err(|e| LlmError::InvalidConfiguration {
                    provider: name.to_string(),
                    message: e.to_string(),
                })?;
            Ok(Box::new(OpenAiProvider::new(provider_config.clone())?))
        }
        other => Err(LlmError::UnsupportedProvider(other.to_string())),
    }
}
