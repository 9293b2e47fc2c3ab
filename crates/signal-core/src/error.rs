//! Error Types

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, SignalError>;

/// Errors raised by the decision engine itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// Rebalance was asked for without any positive portfolio value
    #[error("Insufficient input: {0}")]
    InsufficientInput(String),

    /// A quote failed validation
    #[error(transparent)]
    InvalidQuote(#[from] QuoteError),
}

/// Quote validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Price was zero or negative; never a valid observation
    #[error("Non-positive price {price} for {symbol}")]
    NonPositivePrice { symbol: String, price: Decimal },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_error_converts() {
        let err: SignalError = QuoteError::NonPositivePrice {
            symbol: "XAU".into(),
            price: dec!(0),
        }
        .into();
        assert_eq!(err.to_string(), "Non-positive price 0 for XAU");
    }
}
