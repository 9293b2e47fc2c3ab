//! OpenAI-Compatible Summarizer
//!
//! Plain `POST {base}/chat/completions`; works with any server speaking the
//! same wire format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{empty_response, Summarizer, MAX_TOKENS, SYSTEM_PROMPT};
use crate::error::{Result, RuntimeError};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiSummarizer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiSummarizer {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body<'a>(&'a self, body: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: body,
                },
            ],
            max_tokens: MAX_TOKENS,
        }
    }

    fn parse_completion(raw: &str) -> Result<String> {
        let response: ChatResponse = serde_json::from_str(raw)?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(empty_response)
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn summarize(&self, body: &str) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(body))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RuntimeError::Provider(format!("openai status {}", status.as_u16())));
        }

        let raw = response.text().await?;
        Self::parse_completion(&raw)
    }
}
