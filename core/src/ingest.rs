//! CSV ingestion for the user and transaction files.
//!
//! A file that cannot be opened fails the load. A row that cannot be decoded
//! is logged and skipped. A numeric cell that cannot be coerced is logged and
//! the field falls back to its default (0 for amount, missing for hour/year).

use serde::Deserialize;
use std::{fs::File, io, path::Path, thread};

use crate::{
    error::{DashboardError, DashboardResult},
    record::{TransactionRecord, UserRecord},
    types::Hour,
};

/// Everything one dashboard load works from.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users:        Vec<UserRecord>,
    pub transactions: Vec<TransactionRecord>,
}

impl Dataset {
    pub fn new(users: Vec<UserRecord>, transactions: Vec<TransactionRecord>) -> Self {
        Self { users, transactions }
    }
}

/// Transaction row as it appears on disk, before numeric coercion.
#[derive(Debug, Deserialize)]
struct RawTransactionRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    wallet: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    transaction_category: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    failure_reason: Option<String>,
    #[serde(default)]
    device: Option<String>,
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    hour: Option<String>,
    #[serde(default)]
    day_of_week: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    month: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    is_festival: Option<String>,
    #[serde(default)]
    user_segment: Option<String>,
    #[serde(default)]
    segment: Option<String>,
    #[serde(default)]
    kyc_status: Option<String>,
}

// ── Public loaders ───────────────────────────────────────────────────────────

pub fn load_users<P: AsRef<Path>>(path: P) -> DashboardResult<Vec<UserRecord>> {
    let path = path.as_ref();
    let file = open(path)?;
    read_users(file, &path.display().to_string())
}

pub fn load_transactions<P: AsRef<Path>>(path: P) -> DashboardResult<Vec<TransactionRecord>> {
    let path = path.as_ref();
    let file = open(path)?;
    read_transactions(file, &path.display().to_string())
}

/// Read both files concurrently. Either failure fails the whole load.
pub fn load_all<P, Q>(users_path: P, transactions_path: Q) -> DashboardResult<Dataset>
where
    P: AsRef<Path> + Sync,
    Q: AsRef<Path> + Sync,
{
    let (users, transactions) = thread::scope(|s| {
        let users = s.spawn(|| load_users(&users_path));
        let transactions = s.spawn(|| load_transactions(&transactions_path));
        (users.join(), transactions.join())
    });

    let users = users.map_err(|_| DashboardError::LoaderPanicked {
        source_name: users_path.as_ref().display().to_string(),
    })??;
    let transactions = transactions.map_err(|_| DashboardError::LoaderPanicked {
        source_name: transactions_path.as_ref().display().to_string(),
    })??;

    Ok(Dataset::new(users, transactions))
}

pub fn read_users<R: io::Read>(reader: R, source: &str) -> DashboardResult<Vec<UserRecord>> {
    let mut rdr = csv_reader(reader);
    check_headers(&mut rdr, source)?;

    let mut users = Vec::new();
    let mut skipped = 0usize;
    for (idx, row) in rdr.deserialize::<UserRecord>().enumerate() {
        match row {
            Ok(user) => users.push(user),
            Err(e) => {
                skipped += 1;
                log::warn!("{source}: skipping user row {}: {e}", idx + 2);
            }
        }
    }

    log::info!("{source}: loaded {} users ({skipped} rows skipped)", users.len());
    Ok(users)
}

pub fn read_transactions<R: io::Read>(
    reader: R,
    source: &str,
) -> DashboardResult<Vec<TransactionRecord>> {
    let mut rdr = csv_reader(reader);
    check_headers(&mut rdr, source)?;

    let mut transactions = Vec::new();
    let mut skipped = 0usize;
    for (idx, row) in rdr.deserialize::<RawTransactionRow>().enumerate() {
        let line = idx + 2;
        match row {
            Ok(raw) => transactions.push(coerce(raw, source, line)),
            Err(e) => {
                skipped += 1;
                log::warn!("{source}: skipping transaction row {line}: {e}");
            }
        }
    }

    log::info!(
        "{source}: loaded {} transactions ({skipped} rows skipped)",
        transactions.len()
    );
    Ok(transactions)
}

// ── Internals ────────────────────────────────────────────────────────────────

fn open(path: &Path) -> DashboardResult<File> {
    File::open(path).map_err(|source| DashboardError::Ingest {
        path: path.display().to_string(),
        source,
    })
}

fn csv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// A header that cannot be read means the file itself is unusable.
fn check_headers<R: io::Read>(rdr: &mut csv::Reader<R>, source: &str) -> DashboardResult<()> {
    let headers = rdr.headers()?;
    log::debug!("{source}: columns {:?}", headers.iter().collect::<Vec<_>>());
    Ok(())
}

fn coerce(raw: RawTransactionRow, source: &str, line: usize) -> TransactionRecord {
    let amount = parse_cell::<f64>(raw.amount.as_deref(), "amount", source, line)
        .filter(|a| a.is_finite())
        .unwrap_or(0.0);
    let hour = parse_hour(raw.hour.as_deref(), source, line);
    let year = parse_year(raw.year.as_deref(), source, line);

    TransactionRecord {
        id:                   raw.id,
        transaction_id:       raw.transaction_id,
        user_id:              raw.user_id,
        wallet:               raw.wallet,
        category:             raw.category,
        transaction_category: raw.transaction_category,
        amount,
        status:               raw.status,
        failure_reason:       raw.failure_reason,
        device:               raw.device,
        network:              raw.network,
        district:             raw.district,
        hour,
        day_of_week:          raw.day_of_week,
        date:                 raw.date,
        timestamp:            raw.timestamp,
        month:                raw.month,
        year,
        is_festival:          raw.is_festival,
        user_segment:         raw.user_segment,
        segment:              raw.segment,
        kyc_status:           raw.kyc_status,
    }
}

/// Blank cells are missing; unparseable cells are missing and logged.
fn parse_cell<T: std::str::FromStr>(
    cell: Option<&str>,
    column: &str,
    source: &str,
    line: usize,
) -> Option<T> {
    let value = cell.map(str::trim).filter(|s| !s.is_empty())?;
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("{source}: row {line}: cannot parse {column} '{value}'");
            None
        }
    }
}

/// Accepts `14` and `14.0`; anything outside 0..=23 is dropped.
fn parse_hour(cell: Option<&str>, source: &str, line: usize) -> Option<Hour> {
    let value = parse_cell::<f64>(cell, "hour", source, line)?;
    if value.fract() == 0.0 && (0.0..24.0).contains(&value) {
        Some(value as Hour)
    } else {
        log::warn!("{source}: row {line}: hour {value} out of range");
        None
    }
}

/// Accepts `2024` and `2024.0`, the form a column with gaps is exported in.
fn parse_year(cell: Option<&str>, source: &str, line: usize) -> Option<i32> {
    let value = parse_cell::<f64>(cell, "year", source, line)?;
    if value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        log::warn!("{source}: row {line}: year {value} is not a whole number");
        None
    }
}
