//! Heuristic intervention cards.
//!
//! Cost, benefit and ROI are fixed multipliers over total volume and sibling
//! sub-tables. There is no optimisation behind them; the constants below are
//! display values and are kept exactly as the dashboard has always shown them.

use serde::{Deserialize, Serialize};

use crate::{
    distribution_reducer::{FailureReason, WalletShare},
    metrics::{display_number, round_int},
    population_reducer::KycStats,
    types::{Amount, Percent},
};

// Cost multipliers, as a fraction of total successful volume.
pub const FAILURE_FIX_COST_RATE: f64 = 0.000_01;
pub const KYC_CAMPAIGN_COST_RATE: f64 = 0.000_002;
pub const NETWORK_UPGRADE_COST_RATE: f64 = 0.000_01;
pub const WALLET_EXPANSION_COST_RATE: f64 = 0.000_003;
pub const UX_COST_RATE: f64 = 0.000_002;

// Benefit multipliers, applied to the volume at stake.
pub const FAILURE_FIX_BENEFIT_RATE: f64 = 0.05;
pub const KYC_CAMPAIGN_BENEFIT_RATE: f64 = 0.01;
pub const NETWORK_UPGRADE_BENEFIT_RATE: f64 = 0.08;
pub const WALLET_EXPANSION_BENEFIT_RATE: f64 = 0.15;
pub const UX_BENEFIT_RATE: f64 = 0.03;

// ROI multipliers, applied to the headline percentage.
pub const FAILURE_FIX_ROI: f64 = 20.0;
pub const KYC_CAMPAIGN_ROI: f64 = 3.5;
pub const NETWORK_UPGRADE_ROI: f64 = 15.0;
pub const WALLET_EXPANSION_ROI: f64 = 10.0;
pub const UX_ROI: f64 = 30.0;

/// Headline failure share used when no failure was recorded.
pub const FALLBACK_FAILURE_PCT: f64 = 15.0;
/// Headline wallet headroom used when there is no wallet (or no headroom).
pub const FALLBACK_WALLET_PCT: f64 = 35.0;
/// Network-failure share above which the upgrade is high priority.
pub const NETWORK_HIGH_PRIORITY_PCT: f64 = 20.0;

pub const FULL_KYC_STATUS: &str = "Full KYC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub impact: String,
    pub priority: Priority,
    pub cost: String,
    pub benefit: String,
    pub roi: String,
    pub description: String,
}

pub struct RecommendationInputs<'a> {
    pub total_volume: Amount,
    /// Unrounded; only the card text rounds it.
    pub success_rate: Percent,
    pub wallet_share: &'a [WalletShare],
    pub failure_reasons: &'a [FailureReason],
    pub kyc_data: &'a [KycStats],
}

pub fn recommendations(inputs: &RecommendationInputs<'_>) -> Vec<Recommendation> {
    vec![
        address_top_failure(inputs),
        kyc_campaign(inputs),
        network_upgrade(inputs),
        expand_top_wallet(inputs),
        ux_optimisation(inputs),
    ]
}

fn address_top_failure(inputs: &RecommendationInputs<'_>) -> Recommendation {
    let top = inputs.failure_reasons.first();
    let pct = top.map(|f| f.percentage).unwrap_or(0.0);
    let headline = nonzero_or(pct, FALLBACK_FAILURE_PCT);
    let vol = inputs.total_volume;

    Recommendation {
        title: format!(
            "Address {}",
            top.map_or("Transaction Failures", |f| f.reason.as_str())
        ),
        impact: format!("-{}% failure rate", display_number(headline)),
        priority: Priority::High,
        cost: npr_millions(vol * FAILURE_FIX_COST_RATE),
        benefit: npr_millions(vol * pct / 100.0 * FAILURE_FIX_BENEFIT_RATE),
        roi: roi(headline * FAILURE_FIX_ROI),
        description: format!(
            "Focus on reducing {} which accounts for {}% of all failures",
            top.map_or("failures", |f| f.reason.as_str()),
            display_number(pct)
        ),
    }
}

fn kyc_campaign(inputs: &RecommendationInputs<'_>) -> Recommendation {
    let full_kyc = inputs
        .kyc_data
        .iter()
        .find(|k| k.status.eq_ignore_ascii_case(FULL_KYC_STATUS))
        .map(|k| k.percentage)
        .unwrap_or(0.0);
    let gap = 100.0 - full_kyc;
    let vol = inputs.total_volume;

    Recommendation {
        title: "KYC Awareness Campaign".into(),
        impact: format!("+{}% Full KYC adoption potential", display_number(gap)),
        priority: Priority::High,
        cost: npr_millions(vol * KYC_CAMPAIGN_COST_RATE),
        benefit: npr_millions(vol * gap / 100.0 * KYC_CAMPAIGN_BENEFIT_RATE),
        roi: roi(gap * KYC_CAMPAIGN_ROI),
        description: format!(
            "Only {}% users have Full KYC. Increasing adoption will improve success rates and transaction limits",
            display_number(full_kyc)
        ),
    }
}

fn network_upgrade(inputs: &RecommendationInputs<'_>) -> Recommendation {
    let network_pct: f64 = inputs
        .failure_reasons
        .iter()
        .filter(|f| is_network_reason(&f.reason))
        .map(|f| f.percentage)
        .sum();
    let vol = inputs.total_volume;

    Recommendation {
        title: "Network Infrastructure Upgrade".into(),
        impact: format!("-{}% network-related failures", display_number(network_pct)),
        priority: if network_pct > NETWORK_HIGH_PRIORITY_PCT {
            Priority::High
        } else {
            Priority::Medium
        },
        cost: npr_millions(vol * NETWORK_UPGRADE_COST_RATE),
        benefit: npr_millions(vol * network_pct / 100.0 * NETWORK_UPGRADE_BENEFIT_RATE),
        roi: roi(network_pct * NETWORK_UPGRADE_ROI),
        description: format!(
            "Network issues account for {}% of failures. Infrastructure upgrade is critical",
            display_number(network_pct)
        ),
    }
}

fn expand_top_wallet(inputs: &RecommendationInputs<'_>) -> Recommendation {
    let top = inputs.wallet_share.first();
    let share = top.map(|w| w.value).unwrap_or(0.0);
    let headroom = top
        .map(|w| nonzero_or(100.0 - w.value, FALLBACK_WALLET_PCT))
        .unwrap_or(FALLBACK_WALLET_PCT);
    let vol = inputs.total_volume;

    Recommendation {
        title: format!(
            "Expand {} Market Share",
            top.map_or("Top Wallet", |w| w.name.as_str())
        ),
        impact: format!("+{}% potential growth", display_number(headroom)),
        priority: Priority::High,
        cost: npr_millions(vol * WALLET_EXPANSION_COST_RATE),
        benefit: npr_millions(vol * WALLET_EXPANSION_BENEFIT_RATE),
        roi: roi((100.0 - nonzero_or(share, FALLBACK_WALLET_PCT)) * WALLET_EXPANSION_ROI),
        description: format!(
            "{} currently holds {}% market share with growth opportunity",
            top.map_or("Leading wallet", |w| w.name.as_str()),
            display_number(share)
        ),
    }
}

fn ux_optimisation(inputs: &RecommendationInputs<'_>) -> Recommendation {
    let gap = 100.0 - inputs.success_rate;
    let vol = inputs.total_volume;

    Recommendation {
        title: "User Experience Optimization".into(),
        impact: format!("+{}% success rate improvement potential", display_number(gap)),
        priority: Priority::Medium,
        cost: npr_millions(vol * UX_COST_RATE),
        benefit: npr_millions(vol * gap / 100.0 * UX_BENEFIT_RATE),
        roi: roi(gap * UX_ROI),
        description: format!(
            "Current success rate is {}%. Improving UX can reduce failures and boost conversions",
            display_number(inputs.success_rate)
        ),
    }
}

fn is_network_reason(reason: &str) -> bool {
    let lower = reason.to_lowercase();
    lower.contains("network") || lower.contains("timeout")
}

fn nonzero_or(value: f64, fallback: f64) -> f64 {
    if value == 0.0 {
        fallback
    } else {
        value
    }
}

fn npr_millions(amount: f64) -> String {
    format!("NPR {}M", round_int(amount / 1_000_000.0))
}

fn roi(pct: f64) -> String {
    format!("{}%", round_int(pct))
}
