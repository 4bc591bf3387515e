//! The dashboard assembler.
//!
//! EXECUTION ORDER (fixed, documented):
//!   1. summary
//!   2. categorical breakdowns (wallet, category, district, device, network,
//!      failure reasons)
//!   3. temporal breakdowns (month, hour, weekday, period, year, festival)
//!   4. user-table breakdowns (segments, KYC)
//!   5. predictions, which read wallet/category/district/monthly output
//!   6. recommendations, which read summary/wallet/failure/KYC output
//!
//! RULES:
//!   - Every reducer runs exactly once per build.
//!   - Only steps 5 and 6 read other sub-tables, and only after those exist.
//!   - The snapshot is rebuilt from scratch on every load.

use serde::{Deserialize, Serialize};

use crate::{
    config::DashboardConfig,
    distribution_reducer::{
        self, CategoryShare, DeviceShare, DistrictStats, FailureReason, NetworkStats, WalletShare,
    },
    error::DashboardResult,
    forecast_reducer::{self, ForecastInputs, Predictions2025},
    ingest::{self, Dataset},
    population_reducer::{self, KycStats, SegmentStats},
    recommendation_reducer::{self, Recommendation, RecommendationInputs},
    summary_reducer::{self, Summary},
    temporal_reducer::{
        self, FestivalImpact, HourlyPoint, MonthlyPoint, PeriodPoint, WeekdayPoint, YearlyPoint,
    },
};

/// One full dashboard snapshot. Serialises to the 17 keys the presentation
/// layer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub summary: Summary,
    pub wallet_share: Vec<WalletShare>,
    pub category_data: Vec<CategoryShare>,
    pub monthly_trend: Vec<MonthlyPoint>,
    pub user_segments: Vec<SegmentStats>,
    pub district_data: Vec<DistrictStats>,
    pub hourly_pattern: Vec<HourlyPoint>,
    pub day_of_week_pattern: Vec<WeekdayPoint>,
    pub time_period_breakdown: Vec<PeriodPoint>,
    pub yearly_comparison: Vec<YearlyPoint>,
    pub festival_impact: FestivalImpact,
    pub device_data: Vec<DeviceShare>,
    pub network_data: Vec<NetworkStats>,
    pub failure_reasons: Vec<FailureReason>,
    pub kyc_data: Vec<KycStats>,
    #[serde(rename = "predictions2025")]
    pub predictions_2025: Predictions2025,
    pub recommendations: Vec<Recommendation>,
}

impl DashboardData {
    pub fn build(dataset: &Dataset, config: &DashboardConfig) -> Self {
        let users = dataset.users.as_slice();
        let txns = dataset.transactions.as_slice();
        log::debug!(
            "building dashboard over {} users, {} transactions",
            users.len(),
            txns.len()
        );

        let summary = summary_reducer::summarize(users, txns);

        let wallet_share = distribution_reducer::wallet_share(txns, config);
        let category_data = distribution_reducer::category_distribution(txns);
        let district_data = distribution_reducer::district_distribution(txns);
        let device_data = distribution_reducer::device_distribution(txns);
        let network_data = distribution_reducer::network_performance(txns, users.len());
        let failure_reasons = distribution_reducer::failure_reasons(txns);
        log::debug!(
            "categorical: {} wallets, {} categories, {} districts, {} failure reasons",
            wallet_share.len(),
            category_data.len(),
            district_data.len(),
            failure_reasons.len()
        );

        let monthly_trend = temporal_reducer::monthly_trend(txns);
        let hourly_pattern = temporal_reducer::hourly_pattern(txns);
        let day_of_week_pattern = temporal_reducer::day_of_week_pattern(txns);
        let time_period_breakdown = temporal_reducer::time_period_breakdown(txns);
        let yearly_comparison = temporal_reducer::yearly_comparison(txns);
        let festival_impact = temporal_reducer::festival_impact(txns);
        log::debug!(
            "temporal: {} months, {} years",
            monthly_trend.len(),
            yearly_comparison.len()
        );

        let user_segments = population_reducer::user_segments(users, txns);
        let kyc_data = population_reducer::kyc_impact(users, txns);

        let predictions_2025 = forecast_reducer::predictions_2025(&ForecastInputs {
            total_transactions: summary.total_transactions,
            total_volume: summary.total_volume,
            monthly_trend: &monthly_trend,
            wallet_share: &wallet_share,
            category_data: &category_data,
            district_data: &district_data,
        });

        let recommendations = recommendation_reducer::recommendations(&RecommendationInputs {
            total_volume: summary.total_volume,
            success_rate: summary_reducer::exact_success_rate(txns),
            wallet_share: &wallet_share,
            failure_reasons: &failure_reasons,
            kyc_data: &kyc_data,
        });

        log::info!(
            "dashboard built: {} transactions, {} users, success rate {:.2}%",
            summary.total_transactions,
            summary.total_users,
            summary.success_rate
        );

        Self {
            summary,
            wallet_share,
            category_data,
            monthly_trend,
            user_segments,
            district_data,
            hourly_pattern,
            day_of_week_pattern,
            time_period_breakdown,
            yearly_comparison,
            festival_impact,
            device_data,
            network_data,
            failure_reasons,
            kyc_data,
            predictions_2025,
            recommendations,
        }
    }

    pub fn to_json(&self, pretty: bool) -> DashboardResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Load both configured files and build the snapshot.
pub fn load_dashboard(config: &DashboardConfig) -> DashboardResult<DashboardData> {
    let dataset = ingest::load_all(&config.data.users_csv, &config.data.transactions_csv)?;
    Ok(DashboardData::build(&dataset, config))
}
