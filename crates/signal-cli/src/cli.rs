//! Command-Line Arguments

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use signal_core::PortfolioOverrides;
use signal_runtime::OutputFormat;

/// Portfolio signal generator for a gold / BTC / equity allocation
#[derive(Debug, Parser)]
#[command(name = "signalforge", version, about, long_about = None)]
pub struct Cli {
    /// Which report to produce
    #[arg(long, value_enum, default_value_t = Mode::Daily)]
    pub mode: Mode,

    /// Current gold position value (rebalance mode)
    #[arg(long, value_name = "N")]
    pub gold_value: Option<Decimal>,

    /// Current BTC position value (rebalance mode)
    #[arg(long, value_name = "N")]
    pub btc_value: Option<Decimal>,

    /// Current equity position value (rebalance mode)
    #[arg(long, value_name = "N")]
    pub stock_value: Option<Decimal>,

    /// Deadline for upstream fetches, in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,

    /// Skip the AI briefing even when a provider is configured
    #[arg(long)]
    pub no_summary: bool,

    /// Print only; do not mail the report even when SMTP is configured
    #[arg(long)]
    pub no_email: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Fixed monthly DCA plan
    Dca,
    /// Drop / take-profit signals from live quotes
    Daily,
    /// Allocation drift against targets
    Rebalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> PortfolioOverrides {
        PortfolioOverrides {
            gold: self.gold_value,
            crypto: self.btc_value,
            stock: self.stock_value,
        }
    }
}
