//! Async client for an OpenAI-compatible chat-completion API
//!
//! The resolver only ever needs one request shape: a fixed system message
//! plus one user message, answered by the first choice's message content.
//! The `CompletionClient` trait is the seam that lets tests substitute a
//! scripted completion for the real endpoint.

use crate::core::error::{DjError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// One completion call: system prompt + user message in, reply text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// reqwest-backed `CompletionClient` speaking the OpenAI chat wire format
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl LlmClient {
    /// Create a new client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: OPENAI_API_KEY
    /// Optional: OPENAI_API_URL (defaults to the OpenAI chat endpoint)
    /// Optional: OPENAI_MODEL (defaults to gpt-3.5-turbo)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| DjError::MissingConfig("OPENAI_API_KEY not set".into()))?;
        let api_url = std::env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        Ok(Self::new(api_key, api_url, model))
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DjError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DjError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| DjError::LlmError(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| DjError::LlmError("Empty response".into()))
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}
