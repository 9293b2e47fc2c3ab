//! Quote Model
//!
//! Canonical price record produced by every upstream adapter.
//! Uses `rust_decimal` for all prices - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Which upstream system produced a quote (informational only)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Precious-metal spot price API
    MetalSpot,
    /// Cryptocurrency historical-series API
    CryptoHistory,
    /// Equity chart API
    EquityChart,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MetalSpot => "metal-spot",
            Self::CryptoHistory => "crypto-history",
            Self::EquityChart => "equity-chart",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized market observation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Instrument identifier (e.g., "XAU", "BTC", "XIIT.JK")
    pub symbol: String,

    /// Current unit price in `currency`
    pub price: Decimal,

    /// Highest price over the trailing ~30 days; zero means "no data"
    pub rolling_high: Decimal,

    /// Currency code; may be empty when upstream omitted it
    pub currency: String,

    /// Provenance tag
    pub source: SourceKind,

    /// When the quote was fetched
    pub retrieved_at: DateTime<Utc>,
}

impl Quote {
    /// Create a validated quote. The price must be strictly positive.
    pub fn new(
        symbol: impl Into<String>,
        price: Decimal,
        source: SourceKind,
    ) -> Result<Self, QuoteError> {
        let symbol = symbol.into();
        if price <= Decimal::ZERO {
            return Err(QuoteError::NonPositivePrice { symbol, price });
        }

        Ok(Self {
            symbol,
            price,
            rolling_high: Decimal::ZERO,
            currency: String::new(),
            source,
            retrieved_at: Utc::now(),
        })
    }

    /// Placeholder for a source that failed to deliver.
    ///
    /// Daily mode substitutes this so the remaining assets still get signals.
    /// It is the only quote that may carry a zero price.
    pub fn unavailable(symbol: impl Into<String>, source: SourceKind) -> Self {
        Self {
            symbol: symbol.into(),
            price: Decimal::ZERO,
            rolling_high: Decimal::ZERO,
            currency: String::new(),
            source,
            retrieved_at: Utc::now(),
        }
    }

    pub fn with_rolling_high(mut self, high: Decimal) -> Self {
        self.rolling_high = high;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn retrieved_at(mut self, at: DateTime<Utc>) -> Self {
        self.retrieved_at = at;
        self
    }

    /// False only for [`Quote::unavailable`] placeholders
    pub fn is_available(&self) -> bool {
        self.price > Decimal::ZERO
    }

    /// Whether upstream delivered a usable rolling high
    pub fn has_rolling_high(&self) -> bool {
        self.rolling_high > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejects_non_positive_price() {
        let err = Quote::new("XAU", dec!(0), SourceKind::MetalSpot).unwrap_err();
        assert_eq!(
            err,
            QuoteError::NonPositivePrice {
                symbol: "XAU".into(),
                price: dec!(0),
            }
        );
        assert!(Quote::new("XAU", dec!(-3), SourceKind::MetalSpot).is_err());
    }

    #[test]
    fn test_builder() {
        let quote = Quote::new("BTC", dec!(120), SourceKind::CryptoHistory)
            .unwrap()
            .with_rolling_high(dec!(150))
            .with_currency("IDR");

        assert!(quote.is_available());
        assert!(quote.has_rolling_high());
        assert_eq!(quote.currency, "IDR");
        assert_eq!(quote.source.to_string(), "crypto-history");
    }

    #[test]
    fn test_unavailable_placeholder() {
        let quote = Quote::unavailable("XIIT.JK", SourceKind::EquityChart);
        assert!(!quote.is_available());
        assert!(!quote.has_rolling_high());
    }
}
