//! Stdout Sink

use std::io::Write;

use async_trait::async_trait;
use signal_core::Report;

use super::{OutputFormat, ReportSink};
use crate::error::Result;

/// Prints reports to standard output
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink {
    format: OutputFormat,
}

impl StdoutSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render into any writer
    pub fn write_to<W: Write>(&self, report: &Report, mut out: W) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(out, "{}", report.subject())?;
                writeln!(out)?;
                writeln!(out, "{}", report.body().trim_end())?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, report)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ReportSink for StdoutSink {
    async fn deliver(&self, report: &Report) -> Result<()> {
        self.write_to(report, std::io::stdout().lock())
    }
}
