//! Time-based breakdowns: month, hour, weekday, period of day, year, and the
//! festival/non-festival split.
//!
//! `hourly_pattern`, `day_of_week_pattern` and `time_period_breakdown` always
//! return their full fixed set of buckets, zero-filled when empty.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{TimePeriod, Weekday},
    metrics::{mean_amount, ratio, round2, share_pct, Tally},
    record::TransactionRecord,
    types::{Amount, Hour, Percent},
};

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// `"Oct 2024"`.
    pub month: String,
    pub transactions: usize,
    pub volume: Amount,
    pub success_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    pub hour: Hour,
    pub hour_label: String,
    pub transactions: usize,
    pub percentage: Percent,
    pub success_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayPoint {
    pub day: Weekday,
    pub is_weekend: bool,
    pub transactions: usize,
    pub volume: Amount,
    pub percentage: Percent,
    pub success_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPoint {
    pub period: TimePeriod,
    pub time_range: String,
    pub transactions: usize,
    pub volume: Amount,
    pub percentage: Percent,
    pub success_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyPoint {
    pub year: i32,
    pub transactions: usize,
    pub volume: Amount,
    pub percentage: Percent,
    pub success_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalImpact {
    pub festival_transactions: usize,
    pub non_festival_transactions: usize,
    pub festival_percentage: Percent,
    pub avg_festival_transaction: i64,
    pub avg_non_festival_transaction: i64,
    /// Festival average over non-festival average, minus one, as a percent.
    pub volume_increase: Percent,
}

// ── Month keys ───────────────────────────────────────────────────────────────

/// Bucket key for the monthly trend: `"{month_label} {year}"`.
pub fn month_key(txn: &TransactionRecord) -> String {
    match txn.year {
        Some(year) => format!("{} {year}", txn.month_label()),
        None => format!("{} Unknown", txn.month_label()),
    }
}

/// Chronological sort key. Unknown years and unrecognised months go last.
fn month_sort_key(txn: &TransactionRecord) -> (i32, usize) {
    let year = txn.year.unwrap_or(i32::MAX);
    let month = txn.month_index().unwrap_or(12);
    (year, month)
}

// ── Reducers ─────────────────────────────────────────────────────────────────

pub fn monthly_trend(txns: &[TransactionRecord]) -> Vec<MonthlyPoint> {
    let mut buckets: IndexMap<String, ((i32, usize), Tally)> = IndexMap::new();
    for t in txns {
        buckets
            .entry(month_key(t))
            .or_insert_with(|| (month_sort_key(t), Tally::default()))
            .1
            .add(t);
    }

    let mut keyed: Vec<((i32, usize), MonthlyPoint)> = buckets
        .into_iter()
        .map(|(month, (order, tally))| {
            (
                order,
                MonthlyPoint {
                    month,
                    transactions: tally.transactions,
                    volume: tally.volume,
                    success_rate: tally.success_rate(),
                },
            )
        })
        .collect();
    keyed.sort_by_key(|(order, _)| *order);
    keyed.into_iter().map(|(_, point)| point).collect()
}

pub fn hourly_pattern(txns: &[TransactionRecord]) -> Vec<HourlyPoint> {
    let mut buckets = [Tally::default(); 24];
    for t in txns {
        if let Some(hour) = t.hour.filter(|h| *h < 24) {
            buckets[hour as usize].add(t);
        }
    }

    let total = txns.len();
    buckets
        .iter()
        .enumerate()
        .map(|(hour, tally)| HourlyPoint {
            hour: hour as Hour,
            hour_label: format!("{hour}:00"),
            transactions: tally.transactions,
            percentage: tally.share_of(total),
            success_rate: tally.success_rate(),
        })
        .collect()
}

/// Monday through Sunday. Rows whose weekday cannot be resolved are left out
/// of every bucket.
pub fn day_of_week_pattern(txns: &[TransactionRecord]) -> Vec<WeekdayPoint> {
    let mut buckets = [Tally::default(); 7];
    for t in txns {
        if let Some(day) = t.weekday() {
            buckets[day.position()].add(t);
        }
    }

    let total = txns.len();
    Weekday::ALL
        .iter()
        .map(|&day| {
            let tally = &buckets[day.position()];
            WeekdayPoint {
                day,
                is_weekend: day.is_weekend(),
                transactions: tally.transactions,
                volume: tally.volume,
                percentage: tally.share_of(total),
                success_rate: tally.success_rate(),
            }
        })
        .collect()
}

pub fn time_period_breakdown(txns: &[TransactionRecord]) -> Vec<PeriodPoint> {
    let mut buckets = [Tally::default(); 4];
    for t in txns {
        if let Some(period) = t.hour.and_then(TimePeriod::for_hour) {
            buckets[period as usize].add(t);
        }
    }

    let total = txns.len();
    TimePeriod::ALL
        .iter()
        .map(|&period| {
            let tally = &buckets[period as usize];
            PeriodPoint {
                period,
                time_range: period.time_range(),
                transactions: tally.transactions,
                volume: tally.volume,
                percentage: tally.share_of(total),
                success_rate: tally.success_rate(),
            }
        })
        .collect()
}

/// Rows without a year are skipped.
pub fn yearly_comparison(txns: &[TransactionRecord]) -> Vec<YearlyPoint> {
    let mut buckets: IndexMap<i32, Tally> = IndexMap::new();
    for t in txns {
        if let Some(year) = t.year {
            buckets.entry(year).or_default().add(t);
        }
    }

    let total = txns.len();
    let mut out: Vec<YearlyPoint> = buckets
        .into_iter()
        .map(|(year, tally)| YearlyPoint {
            year,
            transactions: tally.transactions,
            volume: tally.volume,
            percentage: tally.share_of(total),
            success_rate: tally.success_rate(),
        })
        .collect();
    out.sort_by_key(|p| p.year);
    out
}

pub fn festival_impact(txns: &[TransactionRecord]) -> FestivalImpact {
    let mut festival = Tally::default();
    let mut regular = Tally::default();
    for t in txns {
        if t.is_festival() {
            festival.add(t);
        } else {
            regular.add(t);
        }
    }

    let festival_avg = ratio(festival.volume, festival.transactions as f64);
    let regular_avg = ratio(regular.volume, regular.transactions as f64);
    let both_sides = festival.transactions > 0 && regular.transactions > 0;
    let volume_increase = if both_sides && regular_avg != 0.0 {
        round2((festival_avg / regular_avg - 1.0) * 100.0)
    } else {
        0.0
    };

    FestivalImpact {
        festival_transactions: festival.transactions,
        non_festival_transactions: regular.transactions,
        festival_percentage: share_pct(festival.transactions, txns.len()),
        avg_festival_transaction: mean_amount(festival.volume, festival.transactions),
        avg_non_festival_transaction: mean_amount(regular.volume, regular.transactions),
        volume_increase,
    }
}
