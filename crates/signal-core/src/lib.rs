//! # signal-core
//!
//! Quote model and decision engine for a fixed three-asset portfolio:
//! gold, one cryptocurrency and one equity/ETF ticker.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐   ┌─────────────┐
//! │  Quote (x3)  │──▶│  strategy::daily     │──▶│             │
//! └──────────────┘   └──────────────────────┘   │             │
//! ┌──────────────┐   ┌──────────────────────┐   │   Report    │
//! │   Settings   │──▶│  strategy::dca       │──▶│             │
//! │  (immutable) │   │  strategy::rebalance │──▶│             │
//! └──────────────┘   └──────────────────────┘   └─────────────┘
//! ```
//!
//! Everything in this crate is synchronous and pure: quotes and settings go
//! in, one immutable [`Report`] comes out. Fetching quotes lives in
//! `signal-feeds`; delivery and summarization live in `signal-runtime`.
//!
//! ## Entry points
//!
//! - [`compute_monthly_dca`] - fixed monthly plan, needs no market data
//! - [`compute_daily_signals`] - drop/gain driven extra-buy and take-profit signals
//! - [`compute_rebalance`] - allocation drift against targets, fails on empty input

pub mod error;
pub mod format;
pub mod quote;
pub mod report;
pub mod settings;
pub mod strategy;

pub use error::{QuoteError, Result, SignalError};
pub use quote::{Quote, SourceKind};
pub use report::{Report, ReportKind};
pub use settings::{
    Asset, AssetSettings, PortfolioOverrides, Settings, SmtpSettings, SummaryProvider, SummarySettings,
};
pub use strategy::{compute_daily_signals, compute_monthly_dca, compute_rebalance};
