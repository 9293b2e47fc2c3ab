//! Decision Strategies
//!
//! One pure function per report mode.

mod daily;
mod dca;
mod rebalance;

pub use daily::{
    compute_daily_signals, drop_pct, evaluate_daily, evaluate_equity, evaluate_swing, gain_pct,
    DailySignals, EquitySignal, SwingSignal, TAKE_PROFIT_SELL_PCT,
};
pub use dca::compute_monthly_dca;
pub use rebalance::{
    allocate, compute_rebalance, AllocationSnapshot, Recommendation, Share, REBALANCE_BAND,
};
