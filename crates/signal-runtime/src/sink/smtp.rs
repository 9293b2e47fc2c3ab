//! SMTP Sink
//!
//! Mails the report as a plain-text message through `lettre`. Port 465 uses
//! implicit TLS; any other port upgrades with STARTTLS.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use signal_core::{Report, SmtpSettings};

use super::ReportSink;
use crate::error::Result;

const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpSink {
    host: String,
    port: u16,
    credentials: Option<Credentials>,
    from: Mailbox,
    to: Vec<Mailbox>,
    timeout: Duration,
}

impl SmtpSink {
    /// Build a sink from settings, or `None` when host, sender or
    /// recipients are missing. Malformed addresses are errors.
    pub fn from_settings(settings: &SmtpSettings, timeout: Duration) -> Result<Option<Self>> {
        if !settings.is_complete() {
            return Ok(None);
        }

        let to = settings
            .to
            .iter()
            .map(|addr| addr.parse())
            .collect::<std::result::Result<Vec<Mailbox>, _>>()?;
        let credentials = (!settings.user.is_empty())
            .then(|| Credentials::new(settings.user.clone(), settings.pass.clone()));

        Ok(Some(Self {
            host: settings.host.clone(),
            port: settings.port,
            credentials,
            from: settings.from.parse()?,
            to,
            timeout,
        }))
    }

    pub fn message(&self, report: &Report) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(report.subject())
            .header(ContentType::TEXT_PLAIN);
        for to in &self.to {
            builder = builder.to(to.clone());
        }
        Ok(builder.body(report.body().to_string())?)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let builder = if self.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
        };

        let mut builder = builder.port(self.port).timeout(Some(self.timeout));
        if let Some(credentials) = &self.credentials {
            builder = builder.credentials(credentials.clone());
        }
        Ok(builder.build())
    }
}

#[async_trait]
impl ReportSink for SmtpSink {
    async fn deliver(&self, report: &Report) -> Result<()> {
        let message = self.message(report)?;
        self.transport()?.send(message).await?;
        tracing::info!(host = %self.host, recipients = self.to.len(), "report mailed");
        Ok(())
    }
}
