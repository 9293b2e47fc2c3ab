//! Report Value
//!
//! The single output of one run: a subject line and a multi-line body.

use serde::{Deserialize, Serialize};

/// Which computation produced a report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    MonthlyDca,
    DailySignals,
    MonthlyRebalance,
}

impl ReportKind {
    /// Fixed subject line per mode
    pub fn subject(&self) -> &'static str {
        match self {
            Self::MonthlyDca => "Monthly DCA Plan",
            Self::DailySignals => "Daily Investment Signals",
            Self::MonthlyRebalance => "Monthly Rebalance",
        }
    }
}

/// Immutable report handed to the summarizer and the delivery sink
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    kind: ReportKind,
    subject: String,
    body: String,
}

impl Report {
    pub fn new(kind: ReportKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            subject: kind.subject().to_string(),
            body: body.into(),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Return a new report with an `AI Notes` block appended to the body.
    ///
    /// Blank notes leave the report unchanged.
    #[must_use]
    pub fn with_note(self, note: &str) -> Self {
        let note = note.trim();
        if note.is_empty() {
            return self;
        }

        Self {
            body: format!("{}\n\nAI Notes:\n{note}", self.body.trim_end()),
            ..self
        }
    }
}
