use serde::{Deserialize, Serialize};

use super::metric::{Direction, KpiMetric};
use crate::shared::indicators::IndicatorStatus;

/// Tier boundaries for one metric. Both bounds belong to the better tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub good: f64,
    pub warning: f64,
    pub direction: Direction,
}

impl Threshold {
    const fn higher(good: f64, warning: f64) -> Self {
        Self {
            good,
            warning,
            direction: Direction::HigherIsBetter,
        }
    }

    const fn lower(good: f64, warning: f64) -> Self {
        Self {
            good,
            warning,
            direction: Direction::LowerIsBetter,
        }
    }

    pub fn tier(&self, value: f64) -> IndicatorStatus {
        match self.direction {
            Direction::HigherIsBetter => {
                if value >= self.good {
                    IndicatorStatus::Good
                } else if value >= self.warning {
                    IndicatorStatus::Warning
                } else {
                    IndicatorStatus::Bad
                }
            }
            Direction::LowerIsBetter => {
                if value <= self.good {
                    IndicatorStatus::Good
                } else if value <= self.warning {
                    IndicatorStatus::Warning
                } else {
                    IndicatorStatus::Bad
                }
            }
        }
    }
}

const THRESHOLDS: &[(KpiMetric, Threshold)] = &[
    (KpiMetric::CustomerSatisfaction, Threshold::higher(80.0, 70.0)),
    (KpiMetric::RateOfSale, Threshold::lower(5.0, 8.0)),
    (KpiMetric::SoiledAndDamagedRate, Threshold::lower(5.0, 7.0)),
    (KpiMetric::Growth, Threshold::higher(10.0, 0.0)),
    (KpiMetric::StoreVsDepotAvailability, Threshold::higher(50.0, 40.0)),
];

/// Headline network growth card uses a stricter "good" bar than per-store growth.
const NETWORK_GROWTH: Threshold = Threshold::higher(15.0, 0.0);

pub fn threshold_for(metric: KpiMetric) -> Option<Threshold> {
    THRESHOLDS
        .iter()
        .find(|(m, _)| *m == metric)
        .map(|(_, t)| *t)
}

pub fn classify_metric(metric: KpiMetric, value: f64) -> IndicatorStatus {
    threshold_for(metric)
        .map(|t| t.tier(value))
        .unwrap_or(IndicatorStatus::Neutral)
}

/// Tier for a metric given by name; unknown names are `Neutral`.
pub fn classify(metric_name: &str, value: f64) -> IndicatorStatus {
    KpiMetric::from_name(metric_name)
        .map(|m| classify_metric(m, value))
        .unwrap_or(IndicatorStatus::Neutral)
}

pub fn classify_network_growth(value: f64) -> IndicatorStatus {
    NETWORK_GROWTH.tier(value)
}
