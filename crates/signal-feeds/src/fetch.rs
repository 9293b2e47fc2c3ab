//! Concurrent Fetch
//!
//! Runs the three adapters side by side. Each keeps its own result; a failure
//! in one never aborts the others.

use signal_core::{Quote, SourceKind};

use crate::context::FetchContext;
use crate::error::FeedError;
use crate::source::QuoteSource;

/// Result of one adapter call, tagged with where it came from
#[derive(Debug)]
pub struct SourceOutcome {
    pub kind: SourceKind,
    pub symbol: String,
    pub result: Result<Quote, FeedError>,
}

impl SourceOutcome {
    /// The fetched quote, or an unavailable placeholder plus the failure
    fn resolve(self) -> (Quote, Option<SourceFailure>) {
        match self.result {
            Ok(quote) => (quote, None),
            Err(error) => {
                tracing::warn!(
                    source = %self.kind,
                    symbol = %self.symbol,
                    retryable = error.is_retryable(),
                    "fetch failed: {}",
                    error
                );
                let placeholder = Quote::unavailable(self.symbol.clone(), self.kind);
                (
                    placeholder,
                    Some(SourceFailure {
                        kind: self.kind,
                        symbol: self.symbol,
                        error,
                    }),
                )
            }
        }
    }
}

/// Raw outcomes of one concurrent fetch
#[derive(Debug)]
pub struct FetchedQuotes {
    pub gold: SourceOutcome,
    pub crypto: SourceOutcome,
    pub stock: SourceOutcome,
}

/// A source that failed; reported as a warning alongside the report
#[derive(Debug)]
pub struct SourceFailure {
    pub kind: SourceKind,
    pub symbol: String,
    pub error: FeedError,
}

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.symbol, self.kind, self.error)
    }
}

/// Quotes ready for the daily engine, placeholders substituted for failures
#[derive(Debug)]
pub struct ResolvedQuotes {
    pub gold: Quote,
    pub crypto: Quote,
    pub stock: Quote,
    pub failures: Vec<SourceFailure>,
}

impl FetchedQuotes {
    pub fn all_ok(&self) -> bool {
        self.gold.result.is_ok() && self.crypto.result.is_ok() && self.stock.result.is_ok()
    }

    pub fn resolve(self) -> ResolvedQuotes {
        let (gold, gold_failure) = self.gold.resolve();
        let (crypto, crypto_failure) = self.crypto.resolve();
        let (stock, stock_failure) = self.stock.resolve();

        ResolvedQuotes {
            gold,
            crypto,
            stock,
            failures: [gold_failure, crypto_failure, stock_failure]
                .into_iter()
                .flatten()
                .collect(),
        }
    }
}

async fn fetch_one(ctx: &FetchContext, source: &dyn QuoteSource) -> SourceOutcome {
    SourceOutcome {
        kind: source.kind(),
        symbol: source.symbol().to_string(),
        result: source.fetch(ctx).await,
    }
}

/// Fetch all three quotes concurrently
pub async fn fetch_all(
    ctx: &FetchContext,
    gold: &dyn QuoteSource,
    crypto: &dyn QuoteSource,
    stock: &dyn QuoteSource,
) -> FetchedQuotes {
    let (gold, crypto, stock) = tokio::join!(
        fetch_one(ctx, gold),
        fetch_one(ctx, crypto),
        fetch_one(ctx, stock),
    );
    FetchedQuotes { gold, crypto, stock }
}
