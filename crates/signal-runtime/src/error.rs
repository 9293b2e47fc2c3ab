//! Error Types

use thiserror::Error;

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Provider selected but its credentials or feature are missing
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Message could not be assembled
    #[error("Mail error: {0}")]
    Mail(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

impl RuntimeError {
    /// Expected when summarization is simply not set up; not worth a warning
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }
}
