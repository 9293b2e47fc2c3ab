//! Settings
//!
//! Immutable run configuration, loaded once from named keys with built-in
//! defaults and threaded explicitly into every computation.
//!
//! Absent keys fall back to defaults silently. Present keys that do not parse
//! keep the default and log a warning.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The three fixed asset classes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Gold,
    Crypto,
    Stock,
}

/// Per-asset tunables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetSettings {
    /// Target share of the portfolio as a fraction (0.40 = 40%)
    pub target_pct: Decimal,

    /// Fixed monthly DCA amount
    pub monthly_dca: Decimal,

    /// Drop from rolling high (gold/crypto) or loss vs cost (stock) that
    /// triggers a buy signal, in percent
    pub buy_drop_pct: Decimal,

    /// Extra amount to buy when the drop trigger fires (unused for stock)
    pub extra_buy_amount: Decimal,

    /// Gain vs cost basis that triggers take-profit, in percent
    pub take_profit_pct: Decimal,

    /// User-entered average cost basis; zero means not configured
    pub avg_price: Decimal,

    /// Current position value, used by rebalance only
    pub value_now: Decimal,
}

/// Which LLM backend annotates reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryProvider {
    OpenAi,
    Ollama,
    Disabled,
}

impl FromStr for SummaryProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            "none" | "off" | "disabled" => Ok(Self::Disabled),
            other => Err(format!("unknown summary provider '{other}'")),
        }
    }
}

/// Summarizer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummarySettings {
    pub provider: SummaryProvider,
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub ollama_host: String,
    pub ollama_port: u16,
    pub ollama_model: String,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            provider: SummaryProvider::OpenAi,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".into(),
            openai_model: "gpt-4o-mini".into(),
            ollama_host: "http://localhost".into(),
            ollama_port: 11434,
            ollama_model: "llama3.2".into(),
        }
    }
}

/// Outbound mail configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub pass: String,
    pub from: String,
    pub to: Vec<String>,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            user: String::new(),
            pass: String::new(),
            from: String::new(),
            to: Vec::new(),
        }
    }
}

impl SmtpSettings {
    /// Host, sender and at least one recipient are set
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.from.is_empty() && !self.to.is_empty()
    }
}

/// Complete run configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub gold: AssetSettings,
    pub crypto: AssetSettings,
    pub stock: AssetSettings,

    /// Equity/ETF ticker queried from the chart API
    pub stock_ticker: String,

    /// Label for money amounts; also the crypto quote currency and the
    /// display fallback when the equity API omits its currency
    pub base_currency: String,

    /// Currency requested from the metal spot API
    pub gold_currency: String,

    /// Credential for the metal spot API
    #[serde(skip_serializing)]
    pub gold_api_token: Option<String>,

    pub summary: SummarySettings,

    pub smtp: SmtpSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gold: AssetSettings {
                target_pct: dec!(0.40),
                monthly_dca: dec!(600000),
                buy_drop_pct: dec!(5),
                extra_buy_amount: dec!(100000),
                take_profit_pct: dec!(8),
                avg_price: Decimal::ZERO,
                value_now: Decimal::ZERO,
            },
            crypto: AssetSettings {
                target_pct: dec!(0.20),
                monthly_dca: dec!(300000),
                buy_drop_pct: dec!(10),
                extra_buy_amount: dec!(100000),
                take_profit_pct: dec!(20),
                avg_price: Decimal::ZERO,
                value_now: Decimal::ZERO,
            },
            stock: AssetSettings {
                target_pct: dec!(0.40),
                monthly_dca: dec!(600000),
                buy_drop_pct: dec!(10),
                extra_buy_amount: Decimal::ZERO,
                take_profit_pct: dec!(20),
                avg_price: Decimal::ZERO,
                value_now: Decimal::ZERO,
            },
            stock_ticker: "XIIT.JK".into(),
            base_currency: "IDR".into(),
            gold_currency: "USD".into(),
            gold_api_token: None,
            summary: SummarySettings::default(),
            smtp: SmtpSettings::default(),
        }
    }
}

/// Portfolio values supplied on the command line for rebalance mode
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortfolioOverrides {
    pub gold: Option<Decimal>,
    pub crypto: Option<Decimal>,
    pub stock: Option<Decimal>,
}

impl Settings {
    /// Load from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = KeyReader { lookup };
        let mut s = Self::default();

        env.decimal(&["GOLD_TARGET_PCT"], &mut s.gold.target_pct);
        env.decimal(&["BTC_TARGET_PCT"], &mut s.crypto.target_pct);
        env.decimal(&["STOCK_TARGET_PCT"], &mut s.stock.target_pct);

        env.decimal(&["GOLD_DCA"], &mut s.gold.monthly_dca);
        env.decimal(&["BTC_DCA"], &mut s.crypto.monthly_dca);
        env.decimal(&["STOCK_DCA"], &mut s.stock.monthly_dca);

        env.decimal(&["GOLD_EXTRA_BUY_DROP_PCT"], &mut s.gold.buy_drop_pct);
        env.decimal(&["GOLD_TAKE_PROFIT_GAIN_PCT"], &mut s.gold.take_profit_pct);
        env.decimal(&["GOLD_EXTRA_BUY_AMOUNT"], &mut s.gold.extra_buy_amount);
        env.decimal(&["BTC_EXTRA_BUY_DROP_PCT"], &mut s.crypto.buy_drop_pct);
        env.decimal(&["BTC_TAKE_PROFIT_GAIN_PCT"], &mut s.crypto.take_profit_pct);
        env.decimal(&["BTC_EXTRA_BUY_AMOUNT"], &mut s.crypto.extra_buy_amount);
        env.decimal(&["STOCK_BUY_DROP_PCT"], &mut s.stock.buy_drop_pct);
        env.decimal(&["STOCK_TAKE_PROFIT_PCT"], &mut s.stock.take_profit_pct);

        env.decimal(&["GOLD_AVG_PRICE"], &mut s.gold.avg_price);
        env.decimal(&["BTC_AVG_PRICE"], &mut s.crypto.avg_price);
        env.decimal(&["STOCK_AVG_PRICE", "XIIT_AVG_PRICE"], &mut s.stock.avg_price);

        env.decimal(&["GOLD_VALUE_NOW"], &mut s.gold.value_now);
        env.decimal(&["BTC_VALUE_NOW"], &mut s.crypto.value_now);
        env.decimal(&["STOCK_VALUE_NOW"], &mut s.stock.value_now);

        env.string(&["STOCK_TICKER", "XIIT_TICKER"], &mut s.stock_ticker);
        env.string(&["BASE_CURRENCY"], &mut s.base_currency);
        env.string(&["GOLD_CURRENCY"], &mut s.gold_currency);
        s.gold_api_token = env.optional(&["GOLD_API_TOKEN"]);

        env.parsed(&["SUMMARY_PROVIDER"], &mut s.summary.provider);
        s.summary.openai_api_key = env.optional(&["OPENAI_API_KEY"]);
        env.string(&["OPENAI_BASE_URL"], &mut s.summary.openai_base_url);
        env.string(&["OPENAI_MODEL"], &mut s.summary.openai_model);
        env.string(&["OLLAMA_HOST"], &mut s.summary.ollama_host);
        env.parsed(&["OLLAMA_PORT"], &mut s.summary.ollama_port);
        env.string(&["OLLAMA_MODEL"], &mut s.summary.ollama_model);

        env.string(&["SMTP_HOST"], &mut s.smtp.host);
        env.parsed(&["SMTP_PORT"], &mut s.smtp.port);
        env.string(&["SMTP_USER"], &mut s.smtp.user);
        env.string(&["SMTP_PASS"], &mut s.smtp.pass);
        env.string(&["SMTP_FROM"], &mut s.smtp.from);
        env.list(&["SMTP_TO"], &mut s.smtp.to);

        s
    }

    /// Merge command-line portfolio values into a new settings value.
    ///
    /// Only strictly positive overrides replace the loaded values.
    #[must_use]
    pub fn with_overrides(&self, overrides: &PortfolioOverrides) -> Self {
        let mut merged = self.clone();
        let pick = |value: Option<Decimal>, current: Decimal| {
            value.filter(|v| *v > Decimal::ZERO).unwrap_or(current)
        };

        merged.gold.value_now = pick(overrides.gold, self.gold.value_now);
        merged.crypto.value_now = pick(overrides.crypto, self.crypto.value_now);
        merged.stock.value_now = pick(overrides.stock, self.stock.value_now);
        merged
    }

    pub fn asset(&self, asset: Asset) -> &AssetSettings {
        match asset {
            Asset::Gold => &self.gold,
            Asset::Crypto => &self.crypto,
            Asset::Stock => &self.stock,
        }
    }

    /// Display label for an asset in report bodies
    pub fn label(&self, asset: Asset) -> &str {
        match asset {
            Asset::Gold => "Gold",
            Asset::Crypto => "BTC",
            Asset::Stock => &self.stock_ticker,
        }
    }
}

/// Reads the first non-empty value among a key and its legacy aliases
struct KeyReader<F> {
    lookup: F,
}

impl<F> KeyReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, keys: &[&str]) -> Option<(String, String)> {
        keys.iter().find_map(|key| {
            (self.lookup)(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| ((*key).to_string(), v))
        })
    }

    fn optional(&self, keys: &[&str]) -> Option<String> {
        self.raw(keys).map(|(_, v)| v)
    }

    fn string(&self, keys: &[&str], target: &mut String) {
        if let Some(v) = self.optional(keys) {
            *target = v;
        }
    }

    /// Comma-separated values, trimmed, blanks dropped
    fn list(&self, keys: &[&str], target: &mut Vec<String>) {
        if let Some(v) = self.optional(keys) {
            *target = v
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect();
        }
    }

    fn decimal(&self, keys: &[&str], target: &mut Decimal) {
        let Some((key, v)) = self.raw(keys) else {
            return;
        };
        match Decimal::from_str(&v).or_else(|_| Decimal::from_scientific(&v)) {
            Ok(parsed) => *target = parsed,
            Err(e) => tracing::warn!(key = %key, value = %v, "ignoring unparseable number: {}", e),
        }
    }

    fn parsed<T>(&self, keys: &[&str], target: &mut T)
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some((key, v)) = self.raw(keys) else {
            return;
        };
        match v.parse() {
            Ok(parsed) => *target = parsed,
            Err(e) => tracing::warn!(key = %key, value = %v, "ignoring invalid setting: {}", e),
        }
    }
}
