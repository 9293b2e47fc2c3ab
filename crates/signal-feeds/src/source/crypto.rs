//! Cryptocurrency History Adapter
//!
//! Requests a 30-day daily series and recovers both the current price and
//! the rolling high from it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use signal_core::{Quote, SourceKind};

use super::{decimal, get_body, QuoteSource};
use crate::context::FetchContext;
use crate::error::{FeedError, Result};

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const WINDOW_DAYS: u32 = 30;

#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<Vec<f64>>,
}

pub struct CryptoHistorySource {
    client: reqwest::Client,
    base_url: String,
    coin_id: String,
    symbol: String,
    vs_currency: String,
}

impl CryptoHistorySource {
    pub fn new(
        client: reqwest::Client,
        coin_id: impl Into<String>,
        symbol: impl Into<String>,
        vs_currency: &str,
    ) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.into(),
            coin_id: coin_id.into(),
            symbol: symbol.into(),
            vs_currency: vs_currency.to_lowercase(),
        }
    }

    /// Bitcoin priced in `vs_currency`
    pub fn bitcoin(client: reqwest::Client, vs_currency: &str) -> Self {
        Self::new(client, "bitcoin", "BTC", vs_currency)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={WINDOW_DAYS}&interval=daily",
            self.base_url.trim_end_matches('/'),
            self.coin_id,
            self.vs_currency
        )
    }

    /// Decode a `{prices: [[ts, price], ...]}` series.
    ///
    /// One pass: the maximum becomes the rolling high and the last entry is
    /// the current price, even when it is not the maximum.
    pub fn parse(&self, body: &str, retrieved_at: DateTime<Utc>) -> Result<Quote> {
        let chart: MarketChart = serde_json::from_str(body)?;

        let mut last = None;
        let mut high = Decimal::ZERO;
        for entry in &chart.prices {
            let Some(price) = entry.get(1).copied().and_then(decimal) else {
                continue;
            };
            last = Some(price);
            high = high.max(price);
        }

        let price = last.ok_or_else(|| {
            FeedError::DataUnavailable(format!("{} price series empty", self.symbol))
        })?;

        Ok(Quote::new(self.symbol.clone(), price, SourceKind::CryptoHistory)?
            .with_rolling_high(high)
            .with_currency(self.vs_currency.to_uppercase())
            .retrieved_at(retrieved_at))
    }
}

#[async_trait]
impl QuoteSource for CryptoHistorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::CryptoHistory
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Quote> {
        let request = self.client.get(self.endpoint());
        let body = get_body(ctx, self.kind(), request).await?;
        let quote = self.parse(&body, Utc::now())?;

        tracing::debug!(
            symbol = %quote.symbol,
            price = %quote.price,
            high = %quote.rolling_high,
            "crypto history fetched"
        );
        Ok(quote)
    }
}
