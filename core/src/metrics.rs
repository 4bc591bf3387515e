//! Arithmetic helpers shared by every reducer.
//!
//! RULE: a zero denominator always yields 0. No reducer divides directly.

use crate::{
    record::TransactionRecord,
    types::{Amount, Percent},
};
use std::cmp::Ordering;

/// Running counters for one bucket of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub transactions: usize,
    pub successful:   usize,
    pub volume:       Amount,
}

impl Tally {
    pub fn add(&mut self, txn: &TransactionRecord) {
        self.transactions += 1;
        self.volume += txn.amount;
        if txn.is_success() {
            self.successful += 1;
        }
    }

    pub fn success_rate(&self) -> Percent {
        success_rate(self.successful, self.transactions)
    }

    pub fn share_of(&self, total: usize) -> Percent {
        share_pct(self.transactions, total)
    }

    pub fn mean_amount(&self) -> i64 {
        mean_amount(self.volume, self.transactions)
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// Round to the nearest integer. Non-finite input yields 0.
pub fn round_int(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

/// `part / whole`, or 0 when `whole` is 0.
pub fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole
    }
}

/// `count / total * 100` rounded to 2 dp.
pub fn share_pct(count: usize, total: usize) -> Percent {
    round2(ratio(count as f64, total as f64) * 100.0)
}

/// Success rate within a bucket, rounded to 2 dp.
pub fn success_rate(successful: usize, transactions: usize) -> Percent {
    share_pct(successful, transactions)
}

/// Mean amount per row, rounded to the nearest integer.
pub fn mean_amount(total: Amount, rows: usize) -> i64 {
    round_int(ratio(total, rows as f64))
}

/// Descending comparison on an f64 metric. NaN never reaches here since every
/// metric comes through `round2`.
pub fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Print a 2 dp value the way the dashboard text expects: no trailing zeros,
/// no decimal point for whole numbers.
pub fn display_number(value: f64) -> String {
    let rounded = round2(value);
    if rounded == 0.0 {
        // Avoid "-0".
        return "0".into();
    }
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_of_empty_total_is_zero() {
        assert_eq!(share_pct(0, 0), 0.0);
        assert_eq!(share_pct(5, 0), 0.0);
        assert_eq!(mean_amount(100.0, 0), 0);
    }

    #[test]
    fn share_rounds_to_two_places() {
        assert_eq!(share_pct(1, 3), 33.33);
        assert_eq!(share_pct(2, 3), 66.67);
        assert_eq!(share_pct(3, 10), 30.0);
    }

    #[test]
    fn display_drops_trailing_zeros() {
        assert_eq!(display_number(12.5), "12.5");
        assert_eq!(display_number(40.0), "40");
        assert_eq!(display_number(33.333), "33.33");
        assert_eq!(display_number(-0.001), "0");
    }

    #[test]
    fn non_finite_rounds_to_zero() {
        assert_eq!(round2(f64::NAN), 0.0);
        assert_eq!(round_int(f64::INFINITY), 0);
    }
}
