//! dashboard-runner: headless builder for the wallet analytics dashboard.
//!
//! Usage:
//!   dashboard-runner --users users.csv --transactions txns.csv
//!   dashboard-runner --config dashboard.json --out dashboard.json --pretty

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use wallet_dashboard_core::{config::DashboardConfig, dashboard::load_dashboard};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let pretty = args.iter().any(|a| a == "--pretty");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading config {path}"))?,
        None => DashboardConfig::default(),
    };
    if let Some(users) = flag_value(&args, "--users") {
        config.data.users_csv = users.to_string();
    }
    if let Some(txns) = flag_value(&args, "--transactions") {
        config.data.transactions_csv = txns.to_string();
    }

    log::info!(
        "building dashboard from {} and {}",
        config.data.users_csv,
        config.data.transactions_csv
    );

    let dashboard = load_dashboard(&config).context("dashboard load failed")?;
    let json = dashboard.to_json(pretty)?;

    match flag_value(&args, "--out") {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {path}"))?;
            log::info!("wrote {path}");
        }
        None => {
            let mut stdout = io::stdout();
            writeln!(stdout, "{json}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
