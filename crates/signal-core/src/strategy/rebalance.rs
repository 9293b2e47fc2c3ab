//! Monthly Rebalance
//!
//! Compares actual allocation shares against targets using a fixed 5-point
//! band. The band is asymmetric: gold is only ever told to reduce, crypto and
//! stock are only ever told to increase.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};
use crate::format::{format_money, format_share};
use crate::report::{Report, ReportKind};
use crate::settings::{Asset, Settings};

/// Tolerance around a target share, as a fraction
pub const REBALANCE_BAND: Decimal = dec!(0.05);

/// Actual vs target share of one asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub value: Decimal,
    pub actual: Decimal,
    pub target: Decimal,
}

impl Share {
    /// Positive when over-allocated
    pub fn diff(&self) -> Decimal {
        self.actual.checked_sub(self.target).unwrap_or(Decimal::ZERO)
    }

    fn above_band(&self) -> bool {
        self.target
            .checked_add(REBALANCE_BAND)
            .is_some_and(|upper| self.actual > upper)
    }

    fn below_band(&self) -> bool {
        self.target
            .checked_sub(REBALANCE_BAND)
            .is_some_and(|lower| self.actual < lower)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    ReduceGold,
    IncreaseCrypto,
    IncreaseStock,
    Hold,
}

impl Recommendation {
    pub fn message(&self, settings: &Settings) -> String {
        match self {
            Self::ReduceGold => "Reduce gold or pause buys this month.".to_string(),
            Self::IncreaseCrypto => format!("Increase {} DCA slightly.", settings.label(Asset::Crypto)),
            Self::IncreaseStock => {
                format!("Increase {} allocation next month.", settings.label(Asset::Stock))
            }
            Self::Hold => "Portfolio within bands. Hold course.".to_string(),
        }
    }
}

/// Allocation computed from user-supplied current values
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSnapshot {
    pub total: Decimal,
    pub gold: Share,
    pub crypto: Share,
    pub stock: Share,
    pub recommendations: Vec<Recommendation>,
}

/// Compute shares, diffs and recommendations.
///
/// Fails with [`SignalError::InsufficientInput`] when the portfolio total is
/// not positive.
pub fn allocate(settings: &Settings) -> Result<AllocationSnapshot> {
    let total = settings
        .gold
        .value_now
        .checked_add(settings.crypto.value_now)
        .and_then(|sum| sum.checked_add(settings.stock.value_now))
        .ok_or_else(|| SignalError::InsufficientInput("portfolio values out of range".into()))?;
    if total <= Decimal::ZERO {
        return Err(SignalError::InsufficientInput(
            "set GOLD_VALUE_NOW, BTC_VALUE_NOW, STOCK_VALUE_NOW (or pass --gold-value/--btc-value/--stock-value) to rebalance".into(),
        ));
    }

    let share = |asset: Asset| {
        let rules = settings.asset(asset);
        Share {
            value: rules.value_now,
            actual: rules.value_now.checked_div(total).unwrap_or(Decimal::ZERO),
            target: rules.target_pct,
        }
    };
    let gold = share(Asset::Gold);
    let crypto = share(Asset::Crypto);
    let stock = share(Asset::Stock);

    let mut recommendations = Vec::new();
    if gold.above_band() {
        recommendations.push(Recommendation::ReduceGold);
    }
    if crypto.below_band() {
        recommendations.push(Recommendation::IncreaseCrypto);
    }
    if stock.below_band() {
        recommendations.push(Recommendation::IncreaseStock);
    }
    if recommendations.is_empty() {
        recommendations.push(Recommendation::Hold);
    }

    Ok(AllocationSnapshot {
        total,
        gold,
        crypto,
        stock,
        recommendations,
    })
}

/// Build the monthly rebalance report
pub fn compute_rebalance(settings: &Settings) -> Result<Report> {
    let snapshot = allocate(settings)?;
    let cur = &settings.base_currency;

    let mut body = format!("Monthly Rebalance\nTotal: {cur} {}\n", format_money(snapshot.total));
    for (asset, share) in [
        (Asset::Gold, &snapshot.gold),
        (Asset::Crypto, &snapshot.crypto),
        (Asset::Stock, &snapshot.stock),
    ] {
        body.push_str(&format!(
            "{}: {} (target {}, diff {})\n",
            settings.label(asset),
            format_share(share.actual),
            format_share(share.target),
            format_share(share.diff()),
        ));
    }

    body.push_str("Recommendations:\n");
    for rec in &snapshot.recommendations {
        body.push_str(&format!("- {}\n", rec.message(settings)));
    }

    Ok(Report::new(ReportKind::MonthlyRebalance, body))
}
