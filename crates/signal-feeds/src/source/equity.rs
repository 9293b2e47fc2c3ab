//! Equity Chart Adapter
//!
//! Yahoo-style chart endpoint, one month of daily bars for a single ticker.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use signal_core::{Quote, SourceKind};

use super::{decimal, get_body, QuoteSource};
use crate::context::FetchContext;
use crate::error::{FeedError, Result};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// Chart API response structures

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    currency: Option<String>,
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
}

/// Single equity or ETF ticker
pub struct EquityChartSource {
    client: reqwest::Client,
    base_url: String,
    ticker: String,
}

impl EquityChartSource {
    pub fn new(client: reqwest::Client, ticker: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.into(),
            ticker: ticker.into(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v8/finance/chart/{}?range=1mo&interval=1d",
            self.base_url.trim_end_matches('/'),
            self.ticker
        )
    }

    /// Decode a chart payload.
    ///
    /// Price is the last non-null daily close, falling back to
    /// `meta.regularMarketPrice` when the close series is absent or every
    /// entry in it is null. The rolling
    /// high is the max daily high, or zero when the series is absent.
    /// Currency is passed through as-is, possibly empty.
    pub fn parse(&self, body: &str, retrieved_at: DateTime<Utc>) -> Result<Quote> {
        let response: ChartResponse = serde_json::from_str(body)?;

        let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
            let reason = response
                .chart
                .error
                .filter(|e| !e.is_null())
                .map_or_else(|| "empty result".to_string(), |e| e.to_string());
            return Err(FeedError::DataUnavailable(format!("{}: {reason}", self.ticker)));
        };

        let series = result.indicators.quote.into_iter().next().unwrap_or_default();
        let last_close = series.close.iter().rev().find_map(|c| c.and_then(decimal));
        let price = last_close
            .or_else(|| result.meta.regular_market_price.and_then(decimal))
            .ok_or_else(|| FeedError::DataUnavailable(format!("{}: no price", self.ticker)))?;

        let high = series
            .high
            .iter()
            .filter_map(|h| h.and_then(decimal))
            .fold(Decimal::ZERO, Decimal::max);

        Ok(Quote::new(self.ticker.clone(), price, SourceKind::EquityChart)?
            .with_rolling_high(high)
            .with_currency(result.meta.currency.unwrap_or_default())
            .retrieved_at(retrieved_at))
    }
}

#[async_trait]
impl QuoteSource for EquityChartSource {
    fn kind(&self) -> SourceKind {
        SourceKind::EquityChart
    }

    fn symbol(&self) -> &str {
        &self.ticker
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Quote> {
        let request = self.client.get(self.endpoint());
        let body = get_body(ctx, self.kind(), request).await?;
        let quote = self.parse(&body, Utc::now())?;

        tracing::debug!(symbol = %quote.symbol, price = %quote.price, "equity chart fetched");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::serve_once;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn source() -> EquityChartSource {
        EquityChartSource::new(reqwest::Client::new(), "XIIT.JK")
    }

    #[test]
    fn test_last_close_and_max_high() {
        let body = r#"{"chart":{"result":[{
            "meta":{"currency":"IDR","symbol":"XIIT.JK","regularMarketPrice":1010},
            "indicators":{"quote":[{"close":[1000,1040,null,1025],"high":[1010,1060,null,1030]}]}
        }],"error":null}}"#;
        let quote = source().parse(body, Utc::now()).unwrap();

        assert_eq!(quote.price, dec!(1025));
        assert_eq!(quote.rolling_high, dec!(1060));
        assert_eq!(quote.currency, "IDR");
        assert_eq!(quote.symbol, "XIIT.JK");
    }

    #[test]
    fn test_trailing_null_close_skipped() {
        let body = r#"{"chart":{"result":[{"meta":{},
            "indicators":{"quote":[{"close":[1000,990,null],"high":[1005,1000,null]}]}}]}}"#;
        let quote = source().parse(body, Utc::now()).unwrap();
        assert_eq!(quote.price, dec!(990));
    }

    #[test]
    fn test_falls_back_to_regular_market_price() {
        let body = r#"{"chart":{"result":[{
            "meta":{"currency":"IDR","regularMarketPrice":1010.5},
            "indicators":{"quote":[]}
        }]}}"#;
        let quote = source().parse(body, Utc::now()).unwrap();

        assert_eq!(quote.price, dec!(1010.5));
        // no high series: zero, rendered as "no data" downstream
        assert_eq!(quote.rolling_high, Decimal::ZERO);
        assert!(!quote.has_rolling_high());
    }

    #[test]
    fn test_all_null_closes_fall_back_to_regular_market_price() {
        let body = r#"{"chart":{"result":[{
            "meta":{"regularMarketPrice":998},
            "indicators":{"quote":[{"close":[null,null],"high":[1002,null]}]}
        }]}}"#;
        let quote = source().parse(body, Utc::now()).unwrap();

        assert_eq!(quote.price, dec!(998));
        assert_eq!(quote.rolling_high, dec!(1002));
    }

    #[test]
    fn test_missing_currency_stays_empty() {
        let body = r#"{"chart":{"result":[{"meta":{"regularMarketPrice":5}}]}}"#;
        let quote = source().parse(body, Utc::now()).unwrap();
        assert_eq!(quote.currency, "");
    }

    #[test]
    fn test_empty_result_is_data_unavailable() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        let err = source().parse(body, Utc::now()).unwrap_err();
        assert!(matches!(err, FeedError::DataUnavailable(ref m) if m.contains("empty result")));
    }

    #[test]
    fn test_upstream_error_reported() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = source().parse(body, Utc::now()).unwrap_err();
        assert!(matches!(err, FeedError::DataUnavailable(ref m) if m.contains("delisted")));
    }

    #[test]
    fn test_no_price_anywhere() {
        let body = r#"{"chart":{"result":[{"meta":{"currency":"IDR"}}]}}"#;
        let err = source().parse(body, Utc::now()).unwrap_err();
        assert!(matches!(err, FeedError::DataUnavailable(_)));
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            source().with_base_url("http://localhost:8080").endpoint(),
            "http://localhost:8080/v8/finance/chart/XIIT.JK?range=1mo&interval=1d"
        );
    }

    #[tokio::test]
    async fn test_fetch_over_http() {
        let server = serve_once(
            200,
            r#"{"chart":{"result":[{"meta":{"currency":"IDR"},
                "indicators":{"quote":[{"close":[1000,1025],"high":[1010,1060]}]}}],"error":null}}"#,
        )
        .await;
        let src = source().with_base_url(server.base_url.clone());

        let quote = src.fetch(&FetchContext::new(Duration::from_secs(5))).await.unwrap();
        assert_eq!(quote.price, dec!(1025));
        assert_eq!(quote.rolling_high, dec!(1060));
        assert_eq!(quote.source, SourceKind::EquityChart);

        let request = server.request().await;
        assert!(request.starts_with("get /v8/finance/chart/xiit.jk?range=1mo&interval=1d http/1.1"));
    }

    #[tokio::test]
    async fn test_not_found_is_upstream_error() {
        let server = serve_once(404, r#"{"chart":{"result":null,"error":{"code":"Not Found"}}}"#).await;
        let src = source().with_base_url(server.base_url.clone());

        let err = src.fetch(&FetchContext::new(Duration::from_secs(5))).await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::UpstreamStatus {
                kind: SourceKind::EquityChart,
                status: 404
            }
        ));
        assert!(!err.is_retryable());
    }
}
