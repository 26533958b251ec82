use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::growth::{compute_growth, round1, GrowthResult};
use crate::domain::a001_store::StoreRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KpiError {
    #[error("no stores to aggregate")]
    EmptyDataset,

    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    #[error("cannot compare store {0} with itself")]
    SameStore(String),
}

/// Network-wide KPIs over a set of stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkKpis {
    pub store_count: usize,
    pub total_budget: f64,
    pub total_last_year: f64,
    /// Growth of summed budget over summed last-year sales.
    pub growth: GrowthResult,
    pub avg_customer_satisfaction: f64,
    pub avg_reusable_bag_sales: u64,
    pub avg_rate_of_sale: f64,
    pub avg_soiled_and_damaged_rate: f64,
    pub avg_stock_on_hand: u64,
    pub avg_store_vs_depot_availability: f64,
}

fn mean_by(stores: &[StoreRecord], f: impl Fn(&StoreRecord) -> f64) -> f64 {
    stores.iter().map(f).sum::<f64>() / stores.len() as f64
}

/// Means (one decimal, integers for unit counts) and sum-weighted growth.
///
/// Larger stores weigh proportionally more in the network growth figure;
/// it is not a mean of per-store growth rates.
pub fn compute_aggregate_kpis(stores: &[StoreRecord]) -> Result<NetworkKpis, KpiError> {
    if stores.is_empty() {
        return Err(KpiError::EmptyDataset);
    }

    let total_budget: f64 = stores.iter().map(|s| s.sales.budget).sum();
    let total_last_year: f64 = stores.iter().map(|s| s.sales.last_year).sum();

    Ok(NetworkKpis {
        store_count: stores.len(),
        total_budget,
        total_last_year,
        growth: compute_growth(total_budget, total_last_year),
        avg_customer_satisfaction: round1(mean_by(stores, |s| s.customer_satisfaction)),
        avg_reusable_bag_sales: mean_by(stores, |s| s.reusable_bag_sales as f64).round() as u64,
        avg_rate_of_sale: round1(mean_by(stores, |s| s.rate_of_sale)),
        avg_soiled_and_damaged_rate: round1(mean_by(stores, |s| s.soiled_and_damaged_rate)),
        avg_stock_on_hand: mean_by(stores, |s| s.stock_on_hand as f64).round() as u64,
        avg_store_vs_depot_availability: round1(mean_by(stores, |s| {
            s.store_vs_depot_availability
        })),
    })
}
