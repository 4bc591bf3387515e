//! Dashboard configuration: input locations and the wallet colour palette.
//!
//! Loaded from a single JSON file. Every field has a default so an empty
//! object `{}` is a valid config.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    error::{DashboardError, DashboardResult},
    types::Color,
};

pub const DEFAULT_USERS_CSV: &str = "data/nepal_wallet_users_75k.csv";
pub const DEFAULT_TRANSACTIONS_CSV: &str = "data/nepal_digital_wallet_500k.csv";
pub const DEFAULT_WALLET_COLOR: &str = "#9E9E9E";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    #[serde(default = "default_users_csv")]
    pub users_csv: String,
    #[serde(default = "default_transactions_csv")]
    pub transactions_csv: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            users_csv:        default_users_csv(),
            transactions_csv: default_transactions_csv(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default = "default_wallet_colors")]
    pub wallet_colors: HashMap<String, Color>,
    #[serde(default = "default_wallet_color")]
    pub default_wallet_color: Color,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data:                 DataConfig::default(),
            wallet_colors:        default_wallet_colors(),
            default_wallet_color: default_wallet_color(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &str) -> DashboardResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DashboardError::Ingest {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    pub fn from_json(content: &str, path: &str) -> DashboardResult<Self> {
        let config: DashboardConfig =
            serde_json::from_str(content).map_err(|e| DashboardError::Config {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        log::debug!(
            "config {path}: users={} transactions={} palette={} wallets",
            config.data.users_csv,
            config.data.transactions_csv,
            config.wallet_colors.len()
        );
        Ok(config)
    }

    pub fn wallet_color(&self, wallet: &str) -> Color {
        self.wallet_colors
            .get(wallet)
            .cloned()
            .unwrap_or_else(|| self.default_wallet_color.clone())
    }
}

fn default_users_csv() -> String {
    DEFAULT_USERS_CSV.into()
}

fn default_transactions_csv() -> String {
    DEFAULT_TRANSACTIONS_CSV.into()
}

fn default_wallet_color() -> Color {
    DEFAULT_WALLET_COLOR.into()
}

fn default_wallet_colors() -> HashMap<String, Color> {
    [
        ("eSewa",      "#00A76F"),
        ("Khalti",     "#5F2EEA"),
        ("IME Pay",    "#FF3D00"),
        ("ConnectIPS", "#1976D2"),
        ("iPay",       "#FF9800"),
        ("Prabhu Pay", "#FF9800"),
        ("CellPay",    "#9E9E9E"),
        ("MoCo",       "#9E9E9E"),
    ]
    .into_iter()
    .map(|(name, color)| (name.to_string(), color.to_string()))
    .collect()
}
