//! Source Adapters
//!
//! One adapter per upstream API. Each owns its own decoding; they share only
//! the [`QuoteSource`] contract and an immutable HTTP client.

mod crypto;
mod equity;
mod metal;
#[cfg(test)]
pub(crate) mod mock;

pub use crypto::CryptoHistorySource;
pub use equity::EquityChartSource;
pub use metal::MetalSpotSource;

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use signal_core::{Quote, SourceKind};

use crate::context::FetchContext;
use crate::error::{FeedError, Result};

pub const USER_AGENT: &str = concat!("signalforge/", env!("CARGO_PKG_VERSION"));

/// Quote source contract (Strategy pattern)
///
/// Implemented by each upstream adapter. Business-rule absences such as a
/// missing cost basis are never fetch errors.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Which upstream this adapter talks to
    fn kind(&self) -> SourceKind;

    /// Symbol used for the quote, and for the placeholder when fetching fails
    fn symbol(&self) -> &str;

    /// Fetch and normalize one quote
    async fn fetch(&self, ctx: &FetchContext) -> Result<Quote>;
}

/// Shared client for all adapters of one run
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Send a request under the context and return the body of a 2xx response
pub(crate) async fn get_body(
    ctx: &FetchContext,
    kind: SourceKind,
    request: reqwest::RequestBuilder,
) -> Result<String> {
    ctx.run(async move {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                kind,
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    })
    .await
}

/// Upstream numbers arrive as JSON floats; NaN and infinities are dropped.
pub(crate) fn decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}
