//! User-table breakdowns: segments and KYC tiers.
//!
//! Buckets come from the user table. Transactions only contribute to a bucket
//! that already exists there; a transaction tagged with a segment or KYC tier
//! no user has is ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    distribution_reducer::OTHERS,
    metrics::{desc, share_pct, Tally},
    record::{TransactionRecord, UserRecord},
    types::Percent,
};

pub const UNVERIFIED: &str = "Unverified";

// Monthly transaction caps per KYC tier, NPR.
pub const FULL_KYC_LIMIT: u32 = 500_000;
pub const BASIC_KYC_LIMIT: u32 = 100_000;
pub const UNVERIFIED_LIMIT: u32 = 25_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    pub segment: String,
    pub percentage: Percent,
    pub users: usize,
    pub avg_transaction: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycStats {
    pub status: String,
    pub percentage: Percent,
    pub success_rate: Percent,
    pub avg_transaction: i64,
    pub limit: u32,
}

/// Fixed cap for a KYC tier; 0 for tiers the dashboard does not know.
pub fn kyc_limit(status: &str) -> u32 {
    match status.trim().to_ascii_lowercase().as_str() {
        "full kyc" | "full" => FULL_KYC_LIMIT,
        "basic kyc" | "basic" => BASIC_KYC_LIMIT,
        "unverified" => UNVERIFIED_LIMIT,
        _ => 0,
    }
}

#[derive(Default)]
struct Bucket {
    users: usize,
    txns:  Tally,
}

pub fn user_segments(users: &[UserRecord], txns: &[TransactionRecord]) -> Vec<SegmentStats> {
    let mut buckets: IndexMap<&str, Bucket> = IndexMap::new();
    for u in users {
        buckets.entry(u.segment().unwrap_or(OTHERS)).or_default().users += 1;
    }
    for t in txns {
        if let Some(bucket) = buckets.get_mut(t.segment().unwrap_or(OTHERS)) {
            bucket.txns.add(t);
        }
    }

    let total_users = users.len();
    let mut out: Vec<SegmentStats> = buckets
        .into_iter()
        .map(|(segment, bucket)| SegmentStats {
            segment: segment.to_string(),
            percentage: share_pct(bucket.users, total_users),
            users: bucket.users,
            avg_transaction: bucket.txns.mean_amount(),
        })
        .collect();
    out.sort_by(|a, b| desc(a.percentage, b.percentage));
    out
}

pub fn kyc_impact(users: &[UserRecord], txns: &[TransactionRecord]) -> Vec<KycStats> {
    let mut buckets: IndexMap<&str, Bucket> = IndexMap::new();
    for u in users {
        buckets.entry(u.kyc_status().unwrap_or(UNVERIFIED)).or_default().users += 1;
    }
    for t in txns {
        if let Some(bucket) = buckets.get_mut(t.kyc_status().unwrap_or(UNVERIFIED)) {
            bucket.txns.add(t);
        }
    }

    let total_users = users.len();
    let mut out: Vec<KycStats> = buckets
        .into_iter()
        .map(|(status, bucket)| KycStats {
            status: status.to_string(),
            percentage: share_pct(bucket.users, total_users),
            success_rate: bucket.txns.success_rate(),
            avg_transaction: bucket.txns.mean_amount(),
            limit: kyc_limit(status),
        })
        .collect();
    out.sort_by(|a, b| desc(a.percentage, b.percentage));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_fixed_per_tier() {
        assert_eq!(kyc_limit("Full KYC"), 500_000);
        assert_eq!(kyc_limit("basic kyc"), 100_000);
        assert_eq!(kyc_limit("Unverified"), 25_000);
        assert_eq!(kyc_limit("Pending"), 0);
    }
}
