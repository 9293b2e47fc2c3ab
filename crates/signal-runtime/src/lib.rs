//! # signal-runtime
//!
//! Collaborators that act on a finished [`signal_core::Report`]:
//!
//! - **Summarizers** append a short LLM-written note to the body
//!   - OpenAI-compatible chat completions (default)
//!   - Ollama (local inference, `ollama` feature)
//! - **Sinks** deliver the `(subject, body)` pair verbatim
//!   - stdout, as text or JSON
//!   - SMTP through `lettre`, when configured
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signal_runtime::{summarizer_from_settings, ReportSink, SmtpSink, StdoutSink, OutputFormat};
//!
//! let report = match summarizer_from_settings(&settings.summary, client)? {
//!     Some(summarizer) => annotate(report, summarizer.as_ref()).await,
//!     None => report,
//! };
//! StdoutSink::new(OutputFormat::Text).deliver(&report).await?;
//! if let Some(mail) = SmtpSink::from_settings(&settings.smtp, timeout)? {
//!     mail.deliver(&report).await?;
//! }
//! ```

pub mod error;
pub mod sink;
pub mod summarize;

pub use error::{Result, RuntimeError};
pub use sink::{OutputFormat, ReportSink, SmtpSink, StdoutSink};
pub use summarize::{annotate, bound_note, summarizer_from_settings, Summarizer, MAX_NOTE_CHARS};
