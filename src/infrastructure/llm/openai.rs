use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{CommitMessageProvider, LlmError};
use crate::common::config::ProviderConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates detailed and descriptive Git commit messages based on the provided diff and summary of changes.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completions endpoint
pub struct OpenAiProvider {
    config: ProviderConfig,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, diff: &str, changes: &[String]) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(diff, changes),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

impl CommitMessageProvider for OpenAiProvider {
    fn generate_commit_message(&self, diff: &str, changes: &[String]) -> Result<String, LlmError> {
        let url = self.endpoint();
        debug!("POST {} (model {})", url, self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_request(diff, changes))
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        parse_response(status, &body)
    }
}

fn user_prompt(diff: &str, changes: &[String]) -> String {
    let summary: String = changes.iter().map(|c| format!("- {}\n", c)).collect();
    format!(
        "Generate a detailed and descriptive commit message for the following changes:\n\nSummary of changes:\n{}\nFull diff:\n{}",
        summary, diff
    )
}

fn parse_response(status: u16, body: &str) -> Result<String, LlmError> {
    if status != 200 {
        return Err(LlmError::HttpStatus {
            status,
            body: body.to_string(),
        });
    }

    let completion: ChatCompletionResponse = serde_json::from_str(body)?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or(LlmError::UnexpectedResponse)
}
