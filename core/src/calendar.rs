//! Calendar vocabulary: weekdays, months, and the four time-of-day periods.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::Hour;

// ── Weekdays ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Dashboard order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Index into `ALL`.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday    => "Monday",
            Weekday::Tuesday   => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday  => "Thursday",
            Weekday::Friday    => "Friday",
            Weekday::Saturday  => "Saturday",
            Weekday::Sunday    => "Sunday",
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Numeric day index as exported by the source system: 0 = Sunday.
    pub fn from_sunday_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Weekday::Sunday),
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            _ => None,
        }
    }

    /// Full English name or a common abbreviation, case-insensitive.
    pub fn from_alias(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday"                      => Some(Weekday::Monday),
            "tue" | "tues" | "tuesday"            => Some(Weekday::Tuesday),
            "wed" | "wednesday"                   => Some(Weekday::Wednesday),
            "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thursday),
            "fri" | "friday"                      => Some(Weekday::Friday),
            "sat" | "saturday"                    => Some(Weekday::Saturday),
            "sun" | "sunday"                      => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Index first (`3` or `3.0`), then name/alias.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(index) if index.fract() == 0.0 => Self::from_sunday_index(index as i64),
            Ok(_) => None,
            Err(_) => Self::from_alias(trimmed),
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Parse a date or timestamp cell. RFC 3339 values keep their own offset.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

// ── Months ───────────────────────────────────────────────────────────────────

pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_FULL: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Zero-based month index from a name, abbreviation, or 1-based number.
pub fn month_index(raw: &str) -> Option<usize> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<usize>() {
        return (1..=12).contains(&n).then(|| n - 1);
    }
    let lower = s.to_ascii_lowercase();
    MONTH_ABBR
        .iter()
        .position(|abbr| abbr.eq_ignore_ascii_case(&lower))
        .or_else(|| MONTH_FULL.iter().position(|full| *full == lower))
        .or_else(|| (lower == "sept").then_some(8))
}

// ── Time-of-day periods ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimePeriod {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Night,
        TimePeriod::Morning,
        TimePeriod::Afternoon,
        TimePeriod::Evening,
    ];

    /// Half-open hour range `[start, end)`.
    pub fn hours(self) -> (Hour, Hour) {
        match self {
            TimePeriod::Night     => (0, 6),
            TimePeriod::Morning   => (6, 12),
            TimePeriod::Afternoon => (12, 18),
            TimePeriod::Evening   => (18, 24),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimePeriod::Night     => "Night",
            TimePeriod::Morning   => "Morning",
            TimePeriod::Afternoon => "Afternoon",
            TimePeriod::Evening   => "Evening",
        }
    }

    pub fn for_hour(hour: Hour) -> Option<Self> {
        Self::ALL.into_iter().find(|p| {
            let (start, end) = p.hours();
            hour >= start && hour < end
        })
    }

    /// `"06:00-12:00"`.
    pub fn time_range(self) -> String {
        let (start, end) = self.hours();
        format!("{start:02}:00-{end:02}:00")
    }
}
