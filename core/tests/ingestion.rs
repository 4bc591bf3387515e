//! CSV ingestion tests: typed coercion, tolerated row anomalies, fatal file
//! errors.

use std::path::PathBuf;
use wallet_dashboard_core::{
    calendar::Weekday,
    error::DashboardError,
    ingest::{load_all, load_transactions, load_users, read_transactions, read_users},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

const USERS_CSV: &str = "\
user_id,segment,kyc_status,preferred_wallet,device,network,district
U1,Student,Full KYC,eSewa,Android,NTC,Kathmandu
U2,Merchant,Basic KYC,Khalti,iOS,Ncell,Lalitpur
U3,,,,,,
";

const TXNS_CSV: &str = "\
transaction_id,user_id,wallet,transaction_category,amount,status,failure_reason,device,network,district,hour,day_of_week,month,year,is_festival,user_segment,kyc_status
T1,U1,eSewa,Utility,1500,Success,,Android,NTC,Kathmandu,14,1,Oct,2024,Dashain,Student,Full KYC
T2,U2,Khalti,Transfer,250.5,Failed,Network Timeout,iOS,Ncell,Lalitpur,9,Sat,Nov,2024,No,Merchant,Basic KYC
T3,U3,IME Pay,,,Success,,,,,,,,,,,
";

fn write_temp(name: &str, content: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "wallet-dashboard-{}-{name}",
        std::process::id()
    ));
    std::fs::write(&path, content).expect("write temp csv");
    path
}

fn missing_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "wallet-dashboard-{}-missing-{name}.csv",
        std::process::id()
    ))
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn users_parse_with_blank_cells_as_missing() {
    let users = read_users(USERS_CSV.as_bytes(), "users").unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].user_id(), Some("U1"));
    assert_eq!(users[0].segment(), Some("Student"));
    assert_eq!(users[1].kyc_status(), Some("Basic KYC"));
    assert_eq!(users[2].segment(), None);
    assert_eq!(users[2].kyc_status(), None);
}

#[test]
fn transactions_are_coerced() {
    let txns = read_transactions(TXNS_CSV.as_bytes(), "txns").unwrap();
    assert_eq!(txns.len(), 3);

    let t1 = &txns[0];
    assert_eq!(t1.transaction_id(), Some("T1"));
    assert_eq!(t1.amount, 1500.0);
    assert_eq!(t1.hour, Some(14));
    assert_eq!(t1.year, Some(2024));
    assert!(t1.is_success());
    assert!(t1.is_festival());
    assert_eq!(t1.category(), Some("Utility"));
    assert_eq!(t1.segment(), Some("Student"));
    assert_eq!(t1.weekday(), Some(Weekday::Monday));

    let t2 = &txns[1];
    assert_eq!(t2.amount, 250.5);
    assert!(t2.is_failed());
    assert!(!t2.is_festival());
    assert_eq!(t2.weekday(), Some(Weekday::Saturday));

    let t3 = &txns[2];
    assert_eq!(t3.amount, 0.0);
    assert_eq!(t3.hour, None);
    assert_eq!(t3.year, None);
    assert_eq!(t3.category(), None);
}

#[test]
fn undecodable_rows_are_skipped_not_fatal() {
    let mut bytes = b"wallet,amount,status\neSewa,100,Success\n".to_vec();
    bytes.extend_from_slice(b"\xff\xfe,200,Success\n");
    bytes.extend_from_slice(b"Khalti,300,Success\n");

    let txns = read_transactions(bytes.as_slice(), "mixed").unwrap();
    let wallets: Vec<_> = txns.iter().filter_map(|t| t.wallet()).collect();
    assert_eq!(wallets, vec!["eSewa", "Khalti"]);
}

#[test]
fn out_of_range_numbers_fall_back() {
    let csv = "amount,hour,year\n12abc,25,twenty\n";
    let txns = read_transactions(csv.as_bytes(), "bad-numbers").unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount, 0.0);
    assert_eq!(txns[0].hour, None);
    assert_eq!(txns[0].year, None);
}

#[test]
fn index_column_next_to_named_ids_keeps_every_row() {
    let csv = "id,transaction_id,wallet,amount,status\n1,T1,eSewa,100,Success\n2,T2,Khalti,50,Success\n";
    let txns = read_transactions(csv.as_bytes(), "indexed-txns").unwrap();
    assert_eq!(txns.len(), 2, "an extra id column must not reject rows");
    assert_eq!(txns[0].transaction_id(), Some("T1"));
    assert_eq!(txns[1].wallet(), Some("Khalti"));

    let users = read_users("id,user_id,segment\n1,U1,Student\n".as_bytes(), "indexed-users").unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id(), Some("U1"));
    assert_eq!(users[0].segment(), Some("Student"));
}

#[test]
fn id_column_alone_serves_as_identifier() {
    let txns = read_transactions("id,amount\nT9,10\n".as_bytes(), "id-only").unwrap();
    assert_eq!(txns[0].transaction_id(), Some("T9"));

    let users = read_users("id,segment\nU9,Merchant\n".as_bytes(), "id-only").unwrap();
    assert_eq!(users[0].user_id(), Some("U9"));
}

#[test]
fn float_exported_integer_columns_are_read_as_integers() {
    let csv = "amount,status,hour,month,year,day_of_week\n100,Success,14.0,Oct,2024.0,3.0\n";
    let txns = read_transactions(csv.as_bytes(), "float-ints").unwrap();
    assert_eq!(txns.len(), 1);
    let t = &txns[0];
    assert_eq!(t.hour, Some(14));
    assert_eq!(t.year, Some(2024));
    assert_eq!(t.weekday(), Some(Weekday::Wednesday));
}

#[test]
fn header_only_file_is_empty_not_error() {
    let users = read_users("user_id,segment\n".as_bytes(), "empty").unwrap();
    assert!(users.is_empty());
}

#[test]
fn loads_both_files_from_disk() {
    let users_path = write_temp("users.csv", USERS_CSV.as_bytes());
    let txns_path = write_temp("txns.csv", TXNS_CSV.as_bytes());

    assert_eq!(load_users(&users_path).unwrap().len(), 3);
    assert_eq!(load_transactions(&txns_path).unwrap().len(), 3);

    let dataset = load_all(&users_path, &txns_path).unwrap();
    assert_eq!(dataset.users.len(), 3);
    assert_eq!(dataset.transactions.len(), 3);

    let _ = std::fs::remove_file(users_path);
    let _ = std::fs::remove_file(txns_path);
}

#[test]
fn missing_file_is_an_ingest_error() {
    let err = load_users(missing_path("users")).unwrap_err();
    assert!(matches!(err, DashboardError::Ingest { .. }), "got {err:?}");
}

#[test]
fn load_all_fails_when_either_file_is_missing() {
    let users_path = write_temp("only-users.csv", USERS_CSV.as_bytes());
    let txns_path = write_temp("only-txns.csv", TXNS_CSV.as_bytes());

    let err = load_all(&users_path, missing_path("txns")).unwrap_err();
    assert!(matches!(err, DashboardError::Ingest { .. }), "got {err:?}");

    let err = load_all(missing_path("users"), &txns_path).unwrap_err();
    assert!(matches!(err, DashboardError::Ingest { .. }), "got {err:?}");

    let _ = std::fs::remove_file(users_path);
    let _ = std::fs::remove_file(txns_path);
}
