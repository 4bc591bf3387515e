//! Categorical breakdown tests over a hand-checked ten-row dataset.

use wallet_dashboard_core::{
    config::DashboardConfig,
    distribution_reducer::{
        category_distribution, device_distribution, district_distribution, failure_reasons,
        network_performance, wallet_share, PLACEHOLDER_AVG_TIME_MS,
    },
    record::TransactionRecord,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn txn(
    wallet: &str,
    category: Option<&str>,
    failure: Option<&str>,
    network: Option<&str>,
    amount: f64,
) -> TransactionRecord {
    TransactionRecord {
        wallet: Some(wallet.into()),
        category: category.map(Into::into),
        status: Some(if failure.is_some() { "Failed" } else { "Success" }.into()),
        failure_reason: failure.map(Into::into),
        network: network.map(Into::into),
        amount,
        ..Default::default()
    }
}

/// 10 rows: eSewa 5 / Khalti 4 / IME Pay 1; A 3 / C 3 / B 2 / D 1 / none 1;
/// 3 failures, 2 of them network timeouts.
fn ten_rows() -> Vec<TransactionRecord> {
    vec![
        txn("eSewa", Some("A"), None, Some("NTC"), 100.0),
        txn("eSewa", Some("A"), None, Some("NTC"), 200.0),
        txn("eSewa", Some("A"), Some("Network Timeout"), Some("Ncell"), 300.0),
        txn("Khalti", Some("B"), None, Some("NTC"), 400.0),
        txn("Khalti", Some("B"), Some("Insufficient Balance"), Some("Ncell"), 500.0),
        txn("Khalti", Some("C"), None, Some("NTC"), 600.0),
        txn("eSewa", Some("C"), None, Some("NTC"), 700.0),
        txn("IME Pay", Some("C"), Some("Network Timeout"), Some("Ncell"), 800.0),
        txn("eSewa", Some("D"), None, Some("NTC"), 900.0),
        txn("Khalti", None, None, None, 1000.0),
    ]
}

fn assert_sums_to_100(label: &str, values: impl Iterator<Item = f64>) {
    let sum: f64 = values.sum();
    assert!(
        (sum - 100.0).abs() <= 0.1,
        "{label} percentages sum to {sum:.3}, expected ~100"
    );
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn wallet_share_matches_hand_counts() {
    let shares = wallet_share(&ten_rows(), &DashboardConfig::default());

    let got: Vec<(&str, f64, usize)> = shares
        .iter()
        .map(|w| (w.name.as_str(), w.value, w.transactions))
        .collect();
    assert_eq!(
        got,
        vec![("eSewa", 50.0, 5), ("Khalti", 40.0, 4), ("IME Pay", 10.0, 1)]
    );
    assert_eq!(shares[0].color, "#00A76F");
    assert_eq!(shares[2].color, "#FF3D00");
}

#[test]
fn unknown_wallet_uses_default_colour() {
    let rows = vec![txn("ZenPay", None, None, None, 10.0)];
    let shares = wallet_share(&rows, &DashboardConfig::default());
    assert_eq!(shares[0].color, "#9E9E9E");
}

#[test]
fn category_share_and_amounts() {
    let categories = category_distribution(&ten_rows());

    let got: Vec<(&str, f64)> = categories
        .iter()
        .map(|c| (c.category.as_str(), c.percentage))
        .collect();
    // Ties keep first-seen order.
    assert_eq!(
        got,
        vec![("A", 30.0), ("C", 30.0), ("B", 20.0), ("D", 10.0), ("Others", 10.0)]
    );
    assert_eq!(categories[0].amount, 600.0);
    assert_eq!(categories[1].amount, 2100.0);
}

#[test]
fn category_falls_back_to_transaction_category() {
    let mut row = txn("eSewa", None, None, None, 50.0);
    row.transaction_category = Some("Utility".into());
    let categories = category_distribution(&[row]);
    assert_eq!(categories[0].category, "Utility");
    assert_eq!(categories[0].percentage, 100.0);
}

#[test]
fn failure_share_is_relative_to_failed_rows() {
    let rows = ten_rows();
    let reasons = failure_reasons(&rows);

    assert_eq!(reasons.len(), 2);
    assert_eq!(reasons[0].reason, "Network Timeout");
    assert_eq!(reasons[0].count, 2);
    assert_eq!(reasons[0].percentage, 66.67);
    assert_eq!(reasons[1].reason, "Insufficient Balance");
    assert_eq!(reasons[1].percentage, 33.33);
    assert_sums_to_100("failure", reasons.iter().map(|r| r.percentage));
}

#[test]
fn all_success_has_no_failure_reasons() {
    let rows: Vec<_> = (0..5)
        .map(|i| txn("eSewa", Some("A"), None, Some("NTC"), i as f64))
        .collect();
    assert!(failure_reasons(&rows).is_empty());
}

#[test]
fn network_performance_estimates_users_proportionally() {
    let networks = network_performance(&ten_rows(), 20);

    let got: Vec<(&str, usize, f64, i64)> = networks
        .iter()
        .map(|n| (n.network.as_str(), n.transactions, n.success_rate, n.users))
        .collect();
    assert_eq!(
        got,
        vec![
            ("NTC", 6, 100.0, 12),
            ("Ncell", 3, 0.0, 6),
            ("Unknown", 1, 100.0, 2),
        ]
    );
    assert!(networks.iter().all(|n| n.avg_time == PLACEHOLDER_AVG_TIME_MS));
}

#[test]
fn network_users_zero_without_user_table() {
    let networks = network_performance(&ten_rows(), 0);
    assert!(networks.iter().all(|n| n.users == 0));
}

#[test]
fn district_and_device_default_to_unknown() {
    let rows = ten_rows();

    let districts = district_distribution(&rows);
    assert_eq!(districts.len(), 1);
    assert_eq!(districts[0].district, "Unknown");
    assert_eq!(districts[0].transactions, 10);
    assert_eq!(districts[0].success_rate, 70.0);
    assert_eq!(districts[0].volume, 5500.0);

    let devices = device_distribution(&rows);
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].device, "Unknown");
    assert_eq!(devices[0].percentage, 100.0);
}

#[test]
fn district_sorted_by_transaction_count() {
    let mut rows = ten_rows();
    for (i, row) in rows.iter_mut().enumerate() {
        row.district = Some(if i < 2 { "Pokhara" } else if i < 7 { "Kathmandu" } else { "Lalitpur" }.into());
    }
    let districts = district_distribution(&rows);
    let order: Vec<&str> = districts.iter().map(|d| d.district.as_str()).collect();
    assert_eq!(order, vec!["Kathmandu", "Lalitpur", "Pokhara"]);
}

#[test]
fn exhaustive_partitions_sum_to_100() {
    let rows = ten_rows();
    let config = DashboardConfig::default();

    assert_sums_to_100("wallet", wallet_share(&rows, &config).iter().map(|w| w.value));
    assert_sums_to_100(
        "category",
        category_distribution(&rows).iter().map(|c| c.percentage),
    );
    assert_sums_to_100(
        "network",
        network_performance(&rows, 10).iter().map(|n| n.percentage),
    );
    assert_sums_to_100(
        "device",
        device_distribution(&rows).iter().map(|d| d.percentage),
    );
    assert_sums_to_100(
        "district",
        district_distribution(&rows).iter().map(|d| d.percentage),
    );
}

#[test]
fn empty_input_yields_empty_tables() {
    let config = DashboardConfig::default();
    assert!(wallet_share(&[], &config).is_empty());
    assert!(category_distribution(&[]).is_empty());
    assert!(district_distribution(&[]).is_empty());
    assert!(device_distribution(&[]).is_empty());
    assert!(network_performance(&[], 100).is_empty());
    assert!(failure_reasons(&[]).is_empty());
}
