//! KPI derivation, classification and ranking over store records.
//!
//! All functions are pure: they borrow their input, never mutate it and
//! keep no state between calls.

pub mod aggregate;
pub mod comparison;
pub mod growth;
pub mod metric;
pub mod ranking;
pub mod recommendations;
pub mod store_kpis;
pub mod thresholds;

pub use aggregate::{compute_aggregate_kpis, KpiError, NetworkKpis};
pub use comparison::{compare_stores, MetricComparison, Side, StoreComparison};
pub use growth::{compute_growth, round1, round2, GrowthResult};
pub use metric::{Direction, KpiMetric, SortOrder};
pub use ranking::{rank, ranked_entries, stores_needing_attention, top_stores, RankedEntry};
pub use recommendations::{analyze_network, analyze_store, bag_average, Priority, Recommendation};
pub use store_kpis::{
    compute_store_kpis, compute_store_kpis_with, DerivedKpiSet, EstimateSource, Estimated,
    SeededEstimates,
};
pub use thresholds::{classify, classify_metric, classify_network_growth, Threshold};
