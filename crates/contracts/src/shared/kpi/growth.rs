use serde::{Deserialize, Serialize};

/// Rounds to one decimal place, the precision every KPI is reported with.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Outcome of a period-over-period growth calculation.
///
/// A zero baseline has no meaningful growth; it is reported as `Undefined`
/// instead of a bare zero so "no change" and "cannot tell" stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum GrowthResult {
    Defined(f64),
    Undefined,
}

impl GrowthResult {
    pub fn percent(self) -> Option<f64> {
        match self {
            GrowthResult::Defined(p) => Some(p),
            GrowthResult::Undefined => None,
        }
    }

    /// Legacy numeric view: undefined growth reads as `0`.
    pub fn value_or_zero(self) -> f64 {
        self.percent().unwrap_or(0.0)
    }

    pub fn is_defined(self) -> bool {
        matches!(self, GrowthResult::Defined(_))
    }
}

/// `(current / previous - 1) * 100`, rounded to one decimal.
///
/// Inputs are not validated; NaN propagates into `Defined(NaN)`.
pub fn compute_growth(current: f64, previous: f64) -> GrowthResult {
    if previous == 0.0 {
        return GrowthResult::Undefined;
    }
    GrowthResult::Defined(round1((current / previous - 1.0) * 100.0))
}
