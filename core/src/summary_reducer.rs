//! Headline KPI card.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    metrics::{mean_amount, ratio, round_int, share_pct},
    record::{TransactionRecord, UserRecord},
    temporal_reducer::month_key,
    types::{Amount, Hour, Percent},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_transactions: usize,
    pub total_users: usize,
    /// Sum of amount over successful transactions only.
    pub total_volume: Amount,
    pub avg_transaction: i64,
    pub success_rate: Percent,
    /// Rows carrying a failure reason.
    pub failed_transactions: usize,
    pub avg_monthly: i64,
    pub peak_hour: Hour,
}

pub fn summarize(users: &[UserRecord], txns: &[TransactionRecord]) -> Summary {
    let mut successful = 0usize;
    let mut failed = 0usize;
    let mut volume: Amount = 0.0;
    let mut per_hour = [0usize; 24];
    let mut months: IndexSet<String> = IndexSet::new();

    for t in txns {
        if t.is_success() {
            successful += 1;
            volume += t.amount;
        }
        if t.is_failed() {
            failed += 1;
        }
        if let Some(hour) = t.hour.filter(|h| *h < 24) {
            per_hour[hour as usize] += 1;
        }
        months.insert(month_key(t));
    }

    Summary {
        total_transactions: txns.len(),
        total_users: users.len(),
        total_volume: volume,
        avg_transaction: mean_amount(volume, successful),
        success_rate: share_pct(successful, txns.len()),
        failed_transactions: failed,
        avg_monthly: round_int(ratio(txns.len() as f64, months.len() as f64)),
        peak_hour: peak_hour(&per_hour),
    }
}

/// Success percentage before display rounding. Derived figures such as the
/// UX recommendation are computed from this, not from `Summary::success_rate`.
pub fn exact_success_rate(txns: &[TransactionRecord]) -> Percent {
    let successful = txns.iter().filter(|t| t.is_success()).count();
    ratio(successful as f64, txns.len() as f64) * 100.0
}

/// Busiest hour; the earliest hour wins a tie, 0 when every bucket is empty.
fn peak_hour(per_hour: &[usize; 24]) -> Hour {
    let mut best = 0usize;
    for hour in 1..24 {
        if per_hour[hour] > per_hour[best] {
            best = hour;
        }
    }
    best as Hour
}
