//! Typed input rows and the field adapters that resolve schema drift.
//!
//! RULE: reducers never read an ambiguous column directly. Every fallback
//! chain (`category` vs `transaction_category`, `user_segment` vs `segment`,
//! `date` vs `timestamp`) lives in exactly one adapter method here.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    calendar::{self, Weekday},
    types::{Amount, Hour},
};

pub const SUCCESS_STATUS: &str = "Success";

// ── Users ────────────────────────────────────────────────────────────────────

/// One row of the user file. Every column is optional text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub kyc_status: Option<String>,
    #[serde(default)]
    pub preferred_wallet: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

impl UserRecord {
    /// `user_id`, then `id`.
    pub fn user_id(&self) -> Option<&str> {
        present(&self.user_id).or_else(|| present(&self.id))
    }

    pub fn segment(&self) -> Option<&str> {
        present(&self.segment)
    }

    pub fn kyc_status(&self) -> Option<&str> {
        present(&self.kyc_status)
    }
}

// ── Transactions ─────────────────────────────────────────────────────────────

/// One payment attempt. Numeric columns are already coerced; text columns are
/// kept raw and read through the adapter methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecord {
    pub id:                   Option<String>,
    pub transaction_id:       Option<String>,
    pub user_id:              Option<String>,
    pub wallet:               Option<String>,
    pub category:             Option<String>,
    pub transaction_category: Option<String>,
    pub amount:               Amount,
    pub status:               Option<String>,
    pub failure_reason:       Option<String>,
    pub device:               Option<String>,
    pub network:              Option<String>,
    pub district:             Option<String>,
    pub hour:                 Option<Hour>,
    pub day_of_week:          Option<String>,
    pub date:                 Option<String>,
    pub timestamp:            Option<String>,
    pub month:                Option<String>,
    pub year:                 Option<i32>,
    pub is_festival:          Option<String>,
    pub user_segment:         Option<String>,
    pub segment:              Option<String>,
    pub kyc_status:           Option<String>,
}

impl TransactionRecord {
    /// `transaction_id`, then `id`.
    pub fn transaction_id(&self) -> Option<&str> {
        present(&self.transaction_id).or_else(|| present(&self.id))
    }

    pub fn is_success(&self) -> bool {
        present(&self.status).is_some_and(|s| s.eq_ignore_ascii_case(SUCCESS_STATUS))
    }

    /// Failed means a failure reason was recorded, independent of `status`.
    pub fn is_failed(&self) -> bool {
        self.failure_reason().is_some()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        present(&self.failure_reason)
    }

    pub fn wallet(&self) -> Option<&str> {
        present(&self.wallet)
    }

    /// `category`, then `transaction_category`.
    pub fn category(&self) -> Option<&str> {
        present(&self.category).or_else(|| present(&self.transaction_category))
    }

    /// `user_segment`, then `segment`.
    pub fn segment(&self) -> Option<&str> {
        present(&self.user_segment).or_else(|| present(&self.segment))
    }

    pub fn kyc_status(&self) -> Option<&str> {
        present(&self.kyc_status)
    }

    pub fn device(&self) -> Option<&str> {
        present(&self.device)
    }

    pub fn network(&self) -> Option<&str> {
        present(&self.network)
    }

    pub fn district(&self) -> Option<&str> {
        present(&self.district)
    }

    /// `date`, then `timestamp`; the first one that parses wins.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        present(&self.date)
            .and_then(calendar::parse_calendar_date)
            .or_else(|| present(&self.timestamp).and_then(calendar::parse_calendar_date))
    }

    /// Explicit `day_of_week` first, then the weekday of `calendar_date()`.
    pub fn weekday(&self) -> Option<Weekday> {
        present(&self.day_of_week)
            .and_then(Weekday::parse)
            .or_else(|| self.calendar_date().map(Weekday::of_date))
    }

    /// Any flag other than a negative marker names a festival.
    pub fn is_festival(&self) -> bool {
        match present(&self.is_festival) {
            None => false,
            Some(flag) => !["no", "false", "0"]
                .iter()
                .any(|neg| flag.eq_ignore_ascii_case(neg)),
        }
    }

    /// Three-letter month when recognised, raw text otherwise.
    pub fn month_label(&self) -> String {
        match present(&self.month) {
            None => "Unknown".into(),
            Some(raw) => match calendar::month_index(raw) {
                Some(idx) => calendar::MONTH_ABBR[idx].into(),
                None => raw.to_string(),
            },
        }
    }

    pub fn month_index(&self) -> Option<usize> {
        present(&self.month).and_then(calendar::month_index)
    }
}

/// Trimmed, non-blank text or nothing.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
