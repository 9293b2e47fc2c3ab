//! Ollama Summarizer
//!
//! Local inference through `ollama-rs`.

use async_trait::async_trait;
use ollama_rs::{
    generation::{
        chat::{request::ChatMessageRequest, ChatMessage, MessageRole},
    },
    models::ModelOptions as GenerationOptions,
    Ollama,
};

use super::{empty_response, Summarizer, MAX_TOKENS, SYSTEM_PROMPT};
use crate::error::{Result, RuntimeError};

pub struct OllamaSummarizer {
    client: Ollama,
    model: String,
}

impl OllamaSummarizer {
    pub fn new(host: &str, port: u16, model: &str) -> Self {
        Self {
            client: Ollama::new(host, port),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn summarize(&self, body: &str) -> Result<String> {
        let request = ChatMessageRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::new(MessageRole::System, SYSTEM_PROMPT.to_string()),
                ChatMessage::new(MessageRole::User, body.to_string()),
            ],
        )
        .options(GenerationOptions::default().num_predict(i32::try_from(MAX_TOKENS).unwrap_or(i32::MAX)));

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| RuntimeError::Provider(e.to_string()))?;

        let content = response.message.content;
        if content.trim().is_empty() {
            return Err(empty_response());
        }
        Ok(content)
    }
}
