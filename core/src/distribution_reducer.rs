//! Categorical breakdowns over the transaction table.
//!
//! Each function scans the slice once into its own insertion-ordered map,
//! then sorts. Percentages are of the full transaction count except
//! `failure_reasons`, which is relative to failed rows only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    config::DashboardConfig,
    metrics::{desc, round_int, share_pct, Tally},
    record::TransactionRecord,
    types::{Amount, Color, Percent},
};

/// Average processing time reported for every network. The source data has
/// no latency column.
pub const PLACEHOLDER_AVG_TIME_MS: u32 = 2500;

pub const UNKNOWN: &str = "Unknown";
pub const OTHERS: &str = "Others";

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletShare {
    pub name: String,
    pub value: Percent,
    pub transactions: usize,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub percentage: Percent,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictStats {
    pub district: String,
    pub transactions: usize,
    pub percentage: Percent,
    pub volume: Amount,
    pub success_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceShare {
    pub device: String,
    pub percentage: Percent,
    pub transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub network: String,
    pub transactions: usize,
    pub percentage: Percent,
    pub success_rate: Percent,
    /// Users attributed to this network in proportion to its transaction
    /// share.
    pub users: i64,
    pub avg_time: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReason {
    pub reason: String,
    /// Share of failed transactions, not of all transactions.
    pub percentage: Percent,
    pub count: usize,
}

// ── Reducers ─────────────────────────────────────────────────────────────────

pub fn wallet_share(txns: &[TransactionRecord], config: &DashboardConfig) -> Vec<WalletShare> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for t in txns {
        *counts.entry(t.wallet().unwrap_or(UNKNOWN)).or_default() += 1;
    }

    let total = txns.len();
    let mut out: Vec<WalletShare> = counts
        .into_iter()
        .map(|(name, count)| WalletShare {
            name: name.to_string(),
            value: share_pct(count, total),
            transactions: count,
            color: config.wallet_color(name),
        })
        .collect();
    out.sort_by(|a, b| desc(a.value, b.value));
    out
}

pub fn category_distribution(txns: &[TransactionRecord]) -> Vec<CategoryShare> {
    let mut buckets: IndexMap<&str, Tally> = IndexMap::new();
    for t in txns {
        buckets.entry(t.category().unwrap_or(OTHERS)).or_default().add(t);
    }

    let total = txns.len();
    let mut out: Vec<CategoryShare> = buckets
        .into_iter()
        .map(|(category, tally)| CategoryShare {
            category: category.to_string(),
            percentage: tally.share_of(total),
            amount: tally.volume,
        })
        .collect();
    out.sort_by(|a, b| desc(a.percentage, b.percentage));
    out
}

pub fn district_distribution(txns: &[TransactionRecord]) -> Vec<DistrictStats> {
    let mut buckets: IndexMap<&str, Tally> = IndexMap::new();
    for t in txns {
        buckets.entry(t.district().unwrap_or(UNKNOWN)).or_default().add(t);
    }

    let total = txns.len();
    let mut out: Vec<DistrictStats> = buckets
        .into_iter()
        .map(|(district, tally)| DistrictStats {
            district: district.to_string(),
            transactions: tally.transactions,
            percentage: tally.share_of(total),
            volume: tally.volume,
            success_rate: tally.success_rate(),
        })
        .collect();
    out.sort_by(|a, b| b.transactions.cmp(&a.transactions));
    out
}

pub fn device_distribution(txns: &[TransactionRecord]) -> Vec<DeviceShare> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for t in txns {
        *counts.entry(t.device().unwrap_or(UNKNOWN)).or_default() += 1;
    }

    let total = txns.len();
    let mut out: Vec<DeviceShare> = counts
        .into_iter()
        .map(|(device, count)| DeviceShare {
            device: device.to_string(),
            percentage: share_pct(count, total),
            transactions: count,
        })
        .collect();
    out.sort_by(|a, b| desc(a.percentage, b.percentage));
    out
}

/// `total_users` is the size of the user table; it only feeds the
/// proportional `users` estimate.
pub fn network_performance(txns: &[TransactionRecord], total_users: usize) -> Vec<NetworkStats> {
    let mut buckets: IndexMap<&str, Tally> = IndexMap::new();
    for t in txns {
        buckets.entry(t.network().unwrap_or(UNKNOWN)).or_default().add(t);
    }

    let total = txns.len();
    let mut out: Vec<NetworkStats> = buckets
        .into_iter()
        .map(|(network, tally)| NetworkStats {
            network: network.to_string(),
            transactions: tally.transactions,
            percentage: tally.share_of(total),
            success_rate: tally.success_rate(),
            users: estimated_users(tally.transactions, total, total_users),
            avg_time: PLACEHOLDER_AVG_TIME_MS,
        })
        .collect();
    out.sort_by(|a, b| b.transactions.cmp(&a.transactions));
    out
}

pub fn failure_reasons(txns: &[TransactionRecord]) -> Vec<FailureReason> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for t in txns.iter().filter(|t| t.is_failed()) {
        *counts.entry(t.failure_reason().unwrap_or(UNKNOWN)).or_default() += 1;
    }

    let failed: usize = counts.values().sum();
    let mut out: Vec<FailureReason> = counts
        .into_iter()
        .map(|(reason, count)| FailureReason {
            reason: reason.to_string(),
            percentage: share_pct(count, failed),
            count,
        })
        .collect();
    out.sort_by(|a, b| desc(a.percentage, b.percentage));
    out
}

/// `count / (total_txns / total_users)`, written to avoid the inner division.
fn estimated_users(count: usize, total_txns: usize, total_users: usize) -> i64 {
    if total_txns == 0 || total_users == 0 {
        return 0;
    }
    round_int(count as f64 * total_users as f64 / total_txns as f64)
}
