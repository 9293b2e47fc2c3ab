//! Report Orchestration
//!
//! Picks the engine for a mode and, for daily mode, wires the three live
//! adapters into it.

use anyhow::bail;
use signal_core::{Report, Settings, compute_daily_signals, compute_monthly_dca, compute_rebalance};
use signal_feeds::{
    CryptoHistorySource, EquityChartSource, FeedError, FetchContext, MetalSpotSource, QuoteSource,
    fetch_all,
};

use crate::cli::Mode;

/// Produce the unannotated report for one mode
pub async fn build_report(
    mode: Mode,
    settings: &Settings,
    ctx: &FetchContext,
    client: &reqwest::Client,
) -> anyhow::Result<Report> {
    match mode {
        Mode::Dca => Ok(compute_monthly_dca(settings)),
        Mode::Rebalance => Ok(compute_rebalance(settings)?),
        Mode::Daily => {
            let gold = MetalSpotSource::new(
                client.clone(),
                settings.gold_api_token.clone(),
                &settings.gold_currency,
            );
            let crypto = CryptoHistorySource::bitcoin(client.clone(), &settings.base_currency);
            let stock = EquityChartSource::new(client.clone(), settings.stock_ticker.clone());

            daily_report(settings, ctx, &gold, &crypto, &stock).await
        }
    }
}

/// Fetch concurrently and evaluate. Source failures degrade to placeholders;
/// only a cancelled run is an error.
pub async fn daily_report(
    settings: &Settings,
    ctx: &FetchContext,
    gold: &dyn QuoteSource,
    crypto: &dyn QuoteSource,
    stock: &dyn QuoteSource,
) -> anyhow::Result<Report> {
    let fetched = fetch_all(ctx, gold, crypto, stock).await;
    let complete = fetched.all_ok();
    let quotes = fetched.resolve();

    if quotes
        .failures
        .iter()
        .any(|f| matches!(f.error, FeedError::Cancelled))
    {
        bail!("run cancelled");
    }
    if !complete {
        tracing::warn!(
            failed = quotes.failures.len(),
            "daily report built with unavailable quotes"
        );
    }

    Ok(compute_daily_signals(
        settings,
        &quotes.gold,
        &quotes.crypto,
        &quotes.stock,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use signal_core::{PortfolioOverrides, Quote, SignalError, SourceKind};
    use signal_feeds::CancelHandle;
    use std::time::Duration;

    struct Fixed {
        kind: SourceKind,
        symbol: &'static str,
        quote: Option<(Decimal, Decimal)>,
    }

    impl Fixed {
        fn ok(kind: SourceKind, symbol: &'static str, price: Decimal, high: Decimal) -> Self {
            Self {
                kind,
                symbol,
                quote: Some((price, high)),
            }
        }

        fn down(kind: SourceKind, symbol: &'static str) -> Self {
            Self {
                kind,
                symbol,
                quote: None,
            }
        }
    }

    #[async_trait]
    impl QuoteSource for Fixed {
        fn kind(&self) -> SourceKind {
            self.kind
        }

        fn symbol(&self) -> &str {
            self.symbol
        }

        async fn fetch(&self, ctx: &FetchContext) -> signal_feeds::Result<Quote> {
            ctx.run(async {
                let (price, high) = self
                    .quote
                    .ok_or_else(|| FeedError::DataUnavailable("offline".into()))?;
                Ok(Quote::new(self.symbol, price, self.kind)?.with_rolling_high(high))
            })
            .await
        }
    }

    fn ctx() -> FetchContext {
        FetchContext::new(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_dca_needs_no_network() {
        let report = build_report(Mode::Dca, &Settings::default(), &ctx(), &reqwest::Client::new())
            .await
            .unwrap();
        assert!(report.body().contains("Total: IDR 1,500,000"));
    }

    #[tokio::test]
    async fn test_rebalance_without_values_fails() {
        let err = build_report(
            Mode::Rebalance,
            &Settings::default(),
            &ctx(),
            &reqwest::Client::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SignalError>(),
            Some(SignalError::InsufficientInput(_))
        ));
    }

    #[tokio::test]
    async fn test_rebalance_with_overrides() {
        let settings = Settings::default().with_overrides(&PortfolioOverrides {
            gold: Some(dec!(6000000)),
            crypto: Some(dec!(2000000)),
            stock: Some(dec!(2000000)),
        });
        let report = build_report(Mode::Rebalance, &settings, &ctx(), &reqwest::Client::new())
            .await
            .unwrap();
        assert!(report.body().contains("Reduce gold or pause buys this month."));
    }

    #[tokio::test]
    async fn test_daily_degrades_on_source_failure() {
        let gold = Fixed::down(SourceKind::MetalSpot, "XAU");
        let btc = Fixed::ok(SourceKind::CryptoHistory, "BTC", dec!(120), dec!(150));
        let stock = Fixed::ok(SourceKind::EquityChart, "XIIT.JK", dec!(1000), dec!(1100));

        let report = daily_report(&Settings::default(), &ctx(), &gold, &btc, &stock)
            .await
            .unwrap();

        assert!(report.body().contains("Gold: unavailable (30d high n/a)"));
        assert!(report.body().contains("BTC: 120.00"));
    }

    #[tokio::test]
    async fn test_daily_cancelled_run_fails() {
        let handle = CancelHandle::new();
        let ctx = handle.context(Duration::from_secs(5));
        handle.cancel();

        let gold = Fixed::ok(SourceKind::MetalSpot, "XAU", dec!(2000), dec!(2100));
        let btc = Fixed::ok(SourceKind::CryptoHistory, "BTC", dec!(120), dec!(150));
        let stock = Fixed::ok(SourceKind::EquityChart, "XIIT.JK", dec!(1000), dec!(1100));

        assert!(
            daily_report(&Settings::default(), &ctx, &gold, &btc, &stock)
                .await
                .is_err()
        );
    }
}
