use serde::{Deserialize, Serialize};

use super::aggregate::KpiError;
use super::metric::{Direction, KpiMetric};
use crate::domain::a001_store::StoreRecord;

/// Metrics shown in the side-by-side store comparison.
pub const COMPARED_METRICS: [KpiMetric; 5] = [
    KpiMetric::CustomerSatisfaction,
    KpiMetric::RateOfSale,
    KpiMetric::StoreVsDepotAvailability,
    KpiMetric::StockOnHand,
    KpiMetric::ReusableBagSales,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: KpiMetric,
    pub label: String,
    pub left: f64,
    pub right: f64,
    /// `None` on a tie.
    pub winner: Option<Side>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreComparison {
    pub left: String,
    pub right: String,
    pub rows: Vec<MetricComparison>,
}

fn winner(metric: KpiMetric, left: f64, right: f64) -> Option<Side> {
    let left_better = match metric.direction() {
        Direction::HigherIsBetter => left > right,
        Direction::LowerIsBetter => left < right,
    };
    let right_better = match metric.direction() {
        Direction::HigherIsBetter => right > left,
        Direction::LowerIsBetter => right < left,
    };
    match (left_better, right_better) {
        (true, _) => Some(Side::Left),
        (_, true) => Some(Side::Right),
        _ => None,
    }
}

pub fn compare_stores(left: &StoreRecord, right: &StoreRecord) -> Result<StoreComparison, KpiError> {
    if left.name == right.name {
        return Err(KpiError::SameStore(left.name.clone()));
    }

    let rows = COMPARED_METRICS
        .iter()
        .map(|&metric| {
            let (l, r) = (metric.value_of(left), metric.value_of(right));
            MetricComparison {
                metric,
                label: metric.label().to_string(),
                left: l,
                right: r,
                winner: winner(metric, l, r),
            }
        })
        .collect();

    Ok(StoreComparison {
        left: left.name.clone(),
        right: right.name.clone(),
        rows,
    })
}
