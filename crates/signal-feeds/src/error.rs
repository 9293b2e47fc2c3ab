//! Error Types for Source Adapters

use std::time::Duration;

use signal_core::{QuoteError, SourceKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

/// Failure of a single adapter call. Never fatal for the other adapters.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Required secret absent
    #[error("Credential missing: {0}")]
    CredentialMissing(&'static str),

    /// Non-success HTTP status
    #[error("{kind} returned HTTP {status}")]
    UpstreamStatus { kind: SourceKind, status: u16 },

    /// Payload did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Shape matched but carried no usable number
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The run's cancel signal fired while the call was in flight
    #[error("Fetch cancelled")]
    Cancelled,

    #[error("Fetch timed out after {0:?}")]
    TimedOut(Duration),
}

impl FeedError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// Runs are single-shot; this only informs the log line.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::TimedOut(_) => true,
            Self::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<QuoteError> for FeedError {
    fn from(err: QuoteError) -> Self {
        Self::DataUnavailable(err.to_string())
    }
}
