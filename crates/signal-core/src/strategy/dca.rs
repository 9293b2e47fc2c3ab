//! Monthly Dollar-Cost Averaging
//!
//! Emits the fixed configured purchase amounts. Needs no market data.

use rust_decimal::Decimal;

use crate::format::format_money;
use crate::report::{Report, ReportKind};
use crate::settings::{Asset, Settings};

pub fn compute_monthly_dca(settings: &Settings) -> Report {
    let cur = &settings.base_currency;
    let mut body = String::from("Monthly DCA Plan\n");

    let mut total = Decimal::ZERO;
    for asset in [Asset::Gold, Asset::Crypto, Asset::Stock] {
        let amount = settings.asset(asset).monthly_dca;
        total = total.saturating_add(amount);
        body.push_str(&format!("- {}: {cur} {}\n", settings.label(asset), format_money(amount)));
    }
    body.push_str(&format!("Total: {cur} {}\n", format_money(total)));

    Report::new(ReportKind::MonthlyDca, body)
}
