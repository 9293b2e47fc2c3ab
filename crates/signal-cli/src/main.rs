//! signalforge
//!
//! One invocation, one report: load settings, build the report for the chosen
//! mode, optionally append an AI briefing, print it, then mail it when SMTP is
//! configured.

mod cli;
mod run;

use std::time::Duration;

use clap::Parser;
use tracing::Instrument;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use signal_core::Settings;
use signal_feeds::{CancelHandle, http_client};
use signal_runtime::{ReportSink, SmtpSink, StdoutSink, annotate, summarizer_from_settings};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let span = tracing::info_span!("run", id = %Uuid::new_v4(), mode = ?cli.mode);

    execute(cli).instrument(span).await
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::from_env().with_overrides(&cli.overrides());
    let timeout = Duration::from_secs(cli.timeout_secs);

    let cancel = CancelHandle::new();
    let ctx = cancel.context(timeout);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; cancelling fetches");
            cancel.cancel();
        }
    });

    let client = http_client(timeout)?;
    let mut report = run::build_report(cli.mode, &settings, &ctx, &client).await?;

    if cli.no_summary {
        tracing::debug!("summary disabled by flag");
    } else {
        match summarizer_from_settings(&settings.summary, client) {
            Ok(Some(summarizer)) => {
                tracing::info!(provider = summarizer.name(), "requesting summary");
                report = annotate(report, summarizer.as_ref()).await;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("summary unavailable: {}", e),
        }
    }

    StdoutSink::new(cli.format.into()).deliver(&report).await?;

    if cli.no_email {
        return Ok(());
    }
    match SmtpSink::from_settings(&settings.smtp, timeout)? {
        Some(mail) => mail.deliver(&report).await?,
        None => tracing::info!("smtp config missing; skipping email"),
    }
    Ok(())
}
