//! The "2025 prediction" card.
//!
//! NOT a forecast model. The growth rate is the change between the first and
//! last of the most recent six monthly buckets, spread over six months, and
//! every other figure is that rate (or a sibling sub-table) times a fixed
//! constant. Values must stay bit-for-bit reproducible from their inputs.

use serde::{Deserialize, Serialize};

use crate::{
    distribution_reducer::{CategoryShare, DistrictStats, WalletShare},
    metrics::{ratio, round2, round_int},
    temporal_reducer::MonthlyPoint,
    types::{Amount, Percent},
};

/// Months that feed the growth rate.
pub const GROWTH_WINDOW_MONTHS: usize = 6;
/// Growth rate used when fewer than two months are available.
pub const DEFAULT_GROWTH_RATE: f64 = 5.0;
pub const DEFAULT_TOP_WALLET: &str = "eSewa";
pub const HIGH_RISK_PERIODS: [&str; 2] = ["October 2025 (Dashain)", "November 2025 (Tihar)"];

// Display multipliers for the emerging-trend chips. Presentation constants
// with no derivation behind them.
pub const QR_GROWTH_WALLET: &str = "Khalti";
pub const QR_GROWTH_FALLBACK_SHARE: f64 = 20.0;
pub const QR_GROWTH_MULTIPLIER: f64 = 1.25;
pub const GOVERNMENT_CATEGORY: &str = "Government";
pub const GOVERNMENT_FALLBACK_SHARE: f64 = 3.0;
pub const GOVERNMENT_MULTIPLIER: f64 = 6.0;
/// Districts treated as already saturated when estimating rural headroom.
pub const URBAN_CORE_DISTRICTS: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergingTrend {
    pub trend: String,
    /// Signed percent string, e.g. `"+31.00%"`.
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions2025 {
    pub total_transactions: i64,
    pub growth_rate: Percent,
    pub top_wallet: String,
    pub predicted_volume: i64,
    pub high_risk_periods: Vec<String>,
    pub emerging_trends: Vec<EmergingTrend>,
}

/// Inputs borrowed from already-reduced sub-tables.
pub struct ForecastInputs<'a> {
    pub total_transactions: usize,
    pub total_volume: Amount,
    pub monthly_trend: &'a [MonthlyPoint],
    pub wallet_share: &'a [WalletShare],
    pub category_data: &'a [CategoryShare],
    pub district_data: &'a [DistrictStats],
}

/// Average monthly growth in percent over the trailing window.
pub fn growth_rate(monthly_trend: &[MonthlyPoint]) -> f64 {
    let start = monthly_trend.len().saturating_sub(GROWTH_WINDOW_MONTHS);
    let recent = &monthly_trend[start..];
    match (recent.first(), recent.last()) {
        (Some(first), Some(last)) if recent.len() > 1 => {
            let delta = last.transactions as f64 - first.transactions as f64;
            ratio(delta, first.transactions as f64) * 100.0 / GROWTH_WINDOW_MONTHS as f64
        }
        _ => DEFAULT_GROWTH_RATE,
    }
}

pub fn predictions_2025(inputs: &ForecastInputs<'_>) -> Predictions2025 {
    let rate = growth_rate(inputs.monthly_trend);
    let factor = 1.0 + rate / 100.0;

    let top_wallet = inputs
        .wallet_share
        .first()
        .map(|w| w.name.clone())
        .unwrap_or_else(|| DEFAULT_TOP_WALLET.to_string());

    Predictions2025 {
        total_transactions: round_int(inputs.total_transactions as f64 * factor),
        growth_rate: round2(rate),
        top_wallet,
        predicted_volume: round_int(inputs.total_volume * factor),
        high_risk_periods: HIGH_RISK_PERIODS.iter().map(|p| p.to_string()).collect(),
        emerging_trends: emerging_trends(inputs),
    }
}

fn emerging_trends(inputs: &ForecastInputs<'_>) -> Vec<EmergingTrend> {
    let khalti_share = inputs
        .wallet_share
        .iter()
        .find(|w| w.name == QR_GROWTH_WALLET)
        .map(|w| w.value)
        .filter(|v| *v != 0.0)
        .unwrap_or(QR_GROWTH_FALLBACK_SHARE);

    let government_share = inputs
        .category_data
        .iter()
        .find(|c| c.category == GOVERNMENT_CATEGORY)
        .map(|c| c.percentage)
        .filter(|v| *v != 0.0)
        .unwrap_or(GOVERNMENT_FALLBACK_SHARE);

    let districts = inputs.district_data.len() as f64;
    let rural = ratio(districts - URBAN_CORE_DISTRICTS, districts) * 100.0;

    vec![
        trend("QR Payment Growth", khalti_share * QR_GROWTH_MULTIPLIER),
        trend("Government Digital Push", government_share * GOVERNMENT_MULTIPLIER),
        trend("Rural Expansion", rural),
    ]
}

fn trend(name: &str, impact: f64) -> EmergingTrend {
    EmergingTrend {
        trend: name.to_string(),
        impact: format!("+{impact:.2}%"),
    }
}
