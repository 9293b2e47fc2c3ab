//! Report Summarization
//!
//! Strategy trait over LLM backends. A summary is optional decoration: any
//! failure leaves the report as it was.

mod openai;
#[cfg(feature = "ollama")]
mod ollama;

pub use openai::OpenAiSummarizer;
#[cfg(feature = "ollama")]
pub use ollama::OllamaSummarizer;

use async_trait::async_trait;
use signal_core::{Report, SummaryProvider, SummarySettings};

use crate::error::{Result, RuntimeError};

/// Hard cap on the appended note
pub const MAX_NOTE_CHARS: usize = 1200;

/// Completion budget requested from the provider
pub(crate) const MAX_TOKENS: u32 = 240;

pub(crate) const SYSTEM_PROMPT: &str =
    "You generate concise investment briefings with clear actions. Keep it under 160 words.";

/// Strategy trait for summarization backends
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Produce a short briefing for a report body
    async fn summarize(&self, body: &str) -> Result<String>;
}

/// Build the configured summarizer, or `None` when summarization is off or
/// has no credentials.
pub fn summarizer_from_settings(
    settings: &SummarySettings,
    client: reqwest::Client,
) -> Result<Option<Box<dyn Summarizer>>> {
    match settings.provider {
        SummaryProvider::Disabled => Ok(None),
        SummaryProvider::OpenAi => {
            let Some(key) = settings.openai_api_key.clone() else {
                tracing::debug!("OPENAI_API_KEY not set; skipping summary");
                return Ok(None);
            };
            Ok(Some(Box::new(OpenAiSummarizer::new(
                client,
                &settings.openai_base_url,
                key,
                &settings.openai_model,
            ))))
        }
        #[cfg(feature = "ollama")]
        SummaryProvider::Ollama => Ok(Some(Box::new(OllamaSummarizer::new(
            &settings.ollama_host,
            settings.ollama_port,
            &settings.ollama_model,
        )))),
        #[cfg(not(feature = "ollama"))]
        SummaryProvider::Ollama => Err(RuntimeError::NotConfigured(
            "built without the `ollama` feature".into(),
        )),
    }
}

/// Trim and cap a note at [`MAX_NOTE_CHARS`] characters
pub fn bound_note(note: &str) -> String {
    let note = note.trim();
    match note.char_indices().nth(MAX_NOTE_CHARS) {
        Some((cut, _)) => note[..cut].trim_end().to_string(),
        None => note.to_string(),
    }
}

/// Append a summary to the report, or return it untouched on failure
pub async fn annotate(report: Report, summarizer: &dyn Summarizer) -> Report {
    match summarizer.summarize(report.body()).await {
        Ok(note) => {
            let note = bound_note(&note);
            if note.is_empty() {
                tracing::warn!(provider = summarizer.name(), "summary was empty");
                return report;
            }
            report.with_note(&note)
        }
        Err(e) if e.is_not_configured() => report,
        Err(e) => {
            tracing::warn!(provider = summarizer.name(), "summary failed: {}", e);
            report
        }
    }
}

pub(crate) fn empty_response() -> RuntimeError {
    RuntimeError::Provider("empty response".into())
}
