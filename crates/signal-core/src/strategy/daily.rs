//! Daily Signals
//!
//! Drop-from-high and gain-from-cost rules for gold and crypto, and a single
//! three-way signal for the equity ticker.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::format::{format_high, format_money, format_pct, format_price, UNAVAILABLE};
use crate::quote::Quote;
use crate::report::{Report, ReportKind};
use crate::settings::{Asset, AssetSettings, Settings};

/// Share of a position to sell when take-profit fires, in percent
pub const TAKE_PROFIT_SELL_PCT: Decimal = dec!(10);

const HUNDRED: Decimal = dec!(100);

/// Percentage decline of `price` from `high`; zero when there is no high.
pub fn drop_pct(price: Decimal, high: Decimal) -> Decimal {
    if high <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent_of(high.checked_sub(price), high)
}

/// Percentage change of `price` from cost basis `avg`; zero when either side
/// is not positive.
pub fn gain_pct(price: Decimal, avg: Decimal) -> Decimal {
    if price <= Decimal::ZERO || avg <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent_of(price.checked_sub(avg), avg)
}

/// `delta / base * 100`, or zero when any step overflows
fn percent_of(delta: Option<Decimal>, base: Decimal) -> Decimal {
    delta
        .and_then(|d| d.checked_div(base))
        .and_then(|r| r.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Extra-buy / take-profit outcome for gold or crypto
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwingSignal {
    pub drop_pct: Decimal,
    pub gain_pct: Decimal,

    /// Amount to buy on top of the DCA plan (zero = no signal)
    pub extra_buy: Decimal,

    /// Percent of the position to sell (zero = no signal)
    pub sell_pct: Decimal,

    /// False when no cost basis is configured; gain is then meaningless
    pub cost_basis_set: bool,
}

/// Equity signal; carries no amount
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EquitySignal {
    NotConfigured,
    OptionalBuy,
    ConsiderSell,
    Hold,
}

impl EquitySignal {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NotConfigured => "Set STOCK_AVG_PRICE to enable signals",
            Self::OptionalBuy => "Optional Buy",
            Self::ConsiderSell => "Consider selling 10%",
            Self::Hold => "Hold",
        }
    }
}

/// Evaluate the extra-buy and take-profit rules for one asset
pub fn evaluate_swing(quote: &Quote, rules: &AssetSettings) -> SwingSignal {
    let drop = drop_pct(quote.price, quote.rolling_high);
    let gain = gain_pct(quote.price, rules.avg_price);
    let cost_basis_set = rules.avg_price > Decimal::ZERO;

    let extra_buy = if drop >= rules.buy_drop_pct {
        rules.extra_buy_amount
    } else {
        Decimal::ZERO
    };

    // An unset cost basis suppresses take-profit regardless of price.
    let sell_pct = if cost_basis_set && gain >= rules.take_profit_pct {
        TAKE_PROFIT_SELL_PCT
    } else {
        Decimal::ZERO
    };

    SwingSignal {
        drop_pct: drop,
        gain_pct: gain,
        extra_buy,
        sell_pct,
        cost_basis_set,
    }
}

/// Evaluate the equity rule, returning the gain and the signal
pub fn evaluate_equity(quote: &Quote, rules: &AssetSettings) -> (Decimal, EquitySignal) {
    if rules.avg_price <= Decimal::ZERO {
        return (Decimal::ZERO, EquitySignal::NotConfigured);
    }

    let gain = gain_pct(quote.price, rules.avg_price);
    let signal = if gain <= -rules.buy_drop_pct {
        EquitySignal::OptionalBuy
    } else if gain >= rules.take_profit_pct {
        EquitySignal::ConsiderSell
    } else {
        EquitySignal::Hold
    };
    (gain, signal)
}

/// All daily decisions, before rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailySignals {
    pub gold: SwingSignal,
    pub crypto: SwingSignal,
    pub stock_gain_pct: Decimal,
    pub stock: EquitySignal,
}

pub fn evaluate_daily(settings: &Settings, gold: &Quote, crypto: &Quote, stock: &Quote) -> DailySignals {
    let (stock_gain_pct, stock_signal) = evaluate_equity(stock, &settings.stock);
    DailySignals {
        gold: evaluate_swing(gold, &settings.gold),
        crypto: evaluate_swing(crypto, &settings.crypto),
        stock_gain_pct,
        stock: stock_signal,
    }
}

/// Build the daily signal report.
///
/// Failed sources arrive as [`Quote::unavailable`] placeholders; they render
/// as unavailable and produce neutral signals.
pub fn compute_daily_signals(settings: &Settings, gold: &Quote, crypto: &Quote, stock: &Quote) -> Report {
    let signals = evaluate_daily(settings, gold, crypto, stock);
    let cur = &settings.base_currency;

    let mut lines = vec![
        "Daily Signals".to_string(),
        quote_line(settings.label(Asset::Gold), gold, &gold.currency),
        quote_line(settings.label(Asset::Crypto), crypto, &crypto.currency),
    ];
    // Equity currency may be missing upstream; substitute for display only.
    let stock_currency = if stock.currency.is_empty() { cur } else { &stock.currency };
    lines.push(quote_line(settings.label(Asset::Stock), stock, stock_currency));
    lines.push(String::new());

    lines.push("Signals:".to_string());
    for (asset, signal) in [(Asset::Gold, &signals.gold), (Asset::Crypto, &signals.crypto)] {
        lines.push(format!(
            "- {} drop: {}, gain: {}, extra buy: {} {}, sell: {:.0}%",
            settings.label(asset),
            format_pct(signal.drop_pct),
            gain_label(signal.gain_pct, signal.cost_basis_set),
            cur,
            format_money(signal.extra_buy),
            signal.sell_pct,
        ));
    }
    lines.push(format!(
        "- {} gain vs avg: {} -> {}",
        settings.label(Asset::Stock),
        gain_label(signals.stock_gain_pct, signals.stock != EquitySignal::NotConfigured),
        signals.stock.describe(),
    ));

    Report::new(ReportKind::DailySignals, lines.join("\n"))
}

fn quote_line(label: &str, quote: &Quote, currency: &str) -> String {
    if !quote.is_available() {
        return format!("{label}: {UNAVAILABLE} (30d high {})", format_high(quote.rolling_high));
    }
    format!(
        "{label}: {} {currency} (30d high {})",
        format_price(quote.price),
        format_high(quote.rolling_high)
    )
}

fn gain_label(gain: Decimal, cost_basis_set: bool) -> String {
    if cost_basis_set {
        format_pct(gain)
    } else {
        "avg price not set".to_string()
    }
}
