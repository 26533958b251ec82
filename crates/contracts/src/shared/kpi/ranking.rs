use serde::{Deserialize, Serialize};

use super::metric::{KpiMetric, SortOrder};
use super::thresholds::classify_metric;
use crate::domain::a001_store::StoreRecord;
use crate::shared::indicators::IndicatorStatus;

/// Stable sort of a copy of `stores` by `metric`.
///
/// Stores with equal values keep their input order. The input is untouched.
pub fn rank(stores: &[StoreRecord], metric: KpiMetric, order: SortOrder) -> Vec<StoreRecord> {
    let mut ranked = stores.to_vec();
    ranked.sort_by(|a, b| {
        let (va, vb) = (metric.value_of(a), metric.value_of(b));
        match order {
            SortOrder::Ascending => va.total_cmp(&vb),
            SortOrder::Descending => vb.total_cmp(&va),
        }
    });
    ranked
}

/// Highest values first, truncated to `limit`.
pub fn top_stores(stores: &[StoreRecord], metric: KpiMetric, limit: usize) -> Vec<StoreRecord> {
    let mut ranked = rank(stores, metric, SortOrder::Descending);
    ranked.truncate(limit);
    ranked
}

/// Lowest values first, truncated to `limit`.
pub fn stores_needing_attention(
    stores: &[StoreRecord],
    metric: KpiMetric,
    limit: usize,
) -> Vec<StoreRecord> {
    let mut ranked = rank(stores, metric, SortOrder::Ascending);
    ranked.truncate(limit);
    ranked
}

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based.
    pub position: usize,
    pub name: String,
    pub value: f64,
    pub status: IndicatorStatus,
    pub budget: f64,
}

/// Ranking with positions and tiers, as shown in the ranking table.
///
/// Pass `metric.natural_order()` for best-first.
pub fn ranked_entries(stores: &[StoreRecord], metric: KpiMetric, order: SortOrder) -> Vec<RankedEntry> {
    rank(stores, metric, order)
        .into_iter()
        .enumerate()
        .map(|(idx, store)| {
            let value = metric.value_of(&store);
            RankedEntry {
                position: idx + 1,
                status: classify_metric(metric, value),
                value,
                budget: store.sales.budget,
                name: store.name,
            }
        })
        .collect()
}
