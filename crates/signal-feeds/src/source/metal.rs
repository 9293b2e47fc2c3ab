//! Precious-Metal Spot Adapter
//!
//! Token-guarded spot endpoint returning `{metal, currency, price, high_price}`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use signal_core::{Quote, SourceKind};

use super::{decimal, get_body, QuoteSource};
use crate::context::FetchContext;
use crate::error::{FeedError, Result};

const DEFAULT_BASE_URL: &str = "https://www.goldapi.io/api";
const TOKEN_HEADER: &str = "x-access-token";
const GOLD_SYMBOL: &str = "XAU";

#[derive(Debug, Deserialize)]
struct SpotPayload {
    metal: Option<String>,
    currency: Option<String>,
    price: Option<f64>,
    high_price: Option<f64>,
}

/// Gold spot price
pub struct MetalSpotSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    currency: String,
}

impl MetalSpotSource {
    pub fn new(client: reqwest::Client, token: Option<String>, currency: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.into(),
            token,
            currency: currency.into(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{GOLD_SYMBOL}/{}",
            self.base_url.trim_end_matches('/'),
            self.currency.to_uppercase()
        )
    }

    /// Decode a spot payload. The rolling high is clamped up to the spot price.
    pub fn parse(&self, body: &str, retrieved_at: DateTime<Utc>) -> Result<Quote> {
        let payload: SpotPayload = serde_json::from_str(body)?;

        let price = payload
            .price
            .and_then(decimal)
            .ok_or_else(|| FeedError::DataUnavailable("gold price missing".into()))?;
        let high = payload.high_price.and_then(decimal).unwrap_or(Decimal::ZERO).max(price);

        let symbol = payload.metal.filter(|m| !m.is_empty()).unwrap_or_else(|| GOLD_SYMBOL.into());
        let currency = payload
            .currency
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.currency.clone());

        Ok(Quote::new(symbol, price, SourceKind::MetalSpot)?
            .with_rolling_high(high)
            .with_currency(currency)
            .retrieved_at(retrieved_at))
    }
}

#[async_trait]
impl QuoteSource for MetalSpotSource {
    fn kind(&self) -> SourceKind {
        SourceKind::MetalSpot
    }

    fn symbol(&self) -> &str {
        GOLD_SYMBOL
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Quote> {
        let token = self
            .token
            .as_deref()
            .ok_or(FeedError::CredentialMissing("GOLD_API_TOKEN"))?;

        let request = self.client.get(self.endpoint()).header(TOKEN_HEADER, token);
        let body = get_body(ctx, self.kind(), request).await?;
        let quote = self.parse(&body, Utc::now())?;

        tracing::debug!(symbol = %quote.symbol, price = %quote.price, "gold spot fetched");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::serve_once;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn source(token: Option<&str>) -> MetalSpotSource {
        MetalSpotSource::new(reqwest::Client::new(), token.map(String::from), "USD")
    }

    #[test]
    fn test_high_clamped_up_to_price() {
        let quote = source(Some("t"))
            .parse(r#"{"metal":"XAU","currency":"USD","price":2000,"high_price":1900}"#, Utc::now())
            .unwrap();
        assert_eq!(quote.price, dec!(2000));
        assert_eq!(quote.rolling_high, dec!(2000));
    }

    #[test]
    fn test_high_kept_when_above_price() {
        let quote = source(Some("t"))
            .parse(r#"{"metal":"XAU","currency":"USD","price":2000.5,"high_price":2100.25}"#, Utc::now())
            .unwrap();
        assert_eq!(quote.rolling_high, dec!(2100.25));
        assert_eq!(quote.symbol, "XAU");
        assert_eq!(quote.source, SourceKind::MetalSpot);
    }

    #[test]
    fn test_missing_currency_uses_configured_fallback() {
        let quote = source(Some("t")).parse(r#"{"price":2000}"#, Utc::now()).unwrap();
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.symbol, "XAU");
        assert_eq!(quote.rolling_high, dec!(2000));
    }

    #[test]
    fn test_non_positive_price_is_data_unavailable() {
        let err = source(Some("t")).parse(r#"{"price":0,"high_price":10}"#, Utc::now()).unwrap_err();
        assert!(matches!(err, FeedError::DataUnavailable(_)));

        let err = source(Some("t")).parse(r#"{"metal":"XAU"}"#, Utc::now()).unwrap_err();
        assert!(matches!(err, FeedError::DataUnavailable(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = source(Some("t")).parse("<html>rate limited</html>", Utc::now()).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn test_endpoint() {
        let src = source(None).with_base_url("http://localhost:9000/api/");
        assert_eq!(src.endpoint(), "http://localhost:9000/api/XAU/USD");
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() {
        // unroutable base url: reaching the network would not yield CredentialMissing
        let src = source(None).with_base_url("http://127.0.0.1:1");
        let err = src.fetch(&FetchContext::new(Duration::from_secs(1))).await.unwrap_err();
        assert!(matches!(err, FeedError::CredentialMissing("GOLD_API_TOKEN")));
    }

    #[tokio::test]
    async fn test_fetch_sends_token() {
        let server = serve_once(200, r#"{"metal":"XAU","currency":"USD","price":2000,"high_price":2100}"#).await;
        let src = source(Some("tok-1")).with_base_url(server.base_url.clone());

        let quote = src.fetch(&FetchContext::new(Duration::from_secs(5))).await.unwrap();
        assert_eq!(quote.price, dec!(2000));
        assert_eq!(quote.rolling_high, dec!(2100));

        let request = server.request().await;
        assert!(request.starts_with("get /xau/usd http/1.1"));
        assert!(request.contains("x-access-token: tok-1"));
    }
}
