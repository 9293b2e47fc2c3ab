//! Delivery Sinks
//!
//! A sink transmits `(subject, body)` verbatim. Stdout always receives the
//! report; mail is sent when SMTP is fully configured.

mod smtp;
mod stdout;

pub use smtp::SmtpSink;
pub use stdout::StdoutSink;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use signal_core::Report;

use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Subject, blank line, body
    #[default]
    Text,
    /// Report as pretty-printed JSON
    Json,
}

/// Delivery target for a finished report
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, report: &Report) -> Result<()>;
}
