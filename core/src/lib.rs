//! Wallet analytics dashboard pipeline.
//!
//! CSV ingestion → independent reducers → one assembled snapshot.

pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod distribution_reducer;
pub mod error;
pub mod forecast_reducer;
pub mod ingest;
pub mod metrics;
pub mod population_reducer;
pub mod record;
pub mod recommendation_reducer;
pub mod summary_reducer;
pub mod temporal_reducer;
pub mod types;
