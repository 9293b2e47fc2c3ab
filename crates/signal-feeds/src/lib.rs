//! # signal-feeds
//!
//! Source adapters that turn three structurally different price APIs into
//! one canonical [`signal_core::Quote`].
//!
//! | adapter | upstream shape | rolling high |
//! |---|---|---|
//! | [`MetalSpotSource`] | `{price, high_price, currency, metal}` | `high_price`, clamped up to `price` |
//! | [`CryptoHistorySource`] | `{prices: [[ts, price], ...]}` | max of the series; price is the last entry |
//! | [`EquityChartSource`] | `chart.result[0].{meta, indicators.quote[0]}` | max of the daily highs, 0 if absent |
//!
//! Adapters are independent: [`fetch_all`] runs them concurrently and keeps
//! each result separate, so one failing API never hides the other two.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cancel = CancelHandle::new();
//! let ctx = cancel.context(Duration::from_secs(15));
//! let fetched = fetch_all(&ctx, &gold, &crypto, &stock).await;
//! let resolved = fetched.resolve();
//! ```

pub mod context;
pub mod error;
pub mod fetch;
pub mod source;

pub use context::{CancelHandle, FetchContext};
pub use error::{FeedError, Result};
pub use fetch::{fetch_all, FetchedQuotes, ResolvedQuotes, SourceFailure, SourceOutcome};
pub use source::{
    http_client, CryptoHistorySource, EquityChartSource, MetalSpotSource, QuoteSource, USER_AGENT,
};
