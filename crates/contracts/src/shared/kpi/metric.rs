use serde::{Deserialize, Serialize};

use super::growth::compute_growth;
use crate::domain::a001_store::StoreRecord;

/// Direction in which a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// Every per-store metric the engine can read, classify or rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KpiMetric {
    CustomerSatisfaction,
    ReusableBagSales,
    RateOfSale,
    SoiledAndDamagedRate,
    StockOnHand,
    StoreVsDepotAvailability,
    /// Budget vs last year, in percent.
    Growth,
    Budget,
    LastYearSales,
}

impl KpiMetric {
    pub const ALL: [KpiMetric; 9] = [
        KpiMetric::CustomerSatisfaction,
        KpiMetric::ReusableBagSales,
        KpiMetric::RateOfSale,
        KpiMetric::SoiledAndDamagedRate,
        KpiMetric::StockOnHand,
        KpiMetric::StoreVsDepotAvailability,
        KpiMetric::Growth,
        KpiMetric::Budget,
        KpiMetric::LastYearSales,
    ];

    /// Resolves both the camelCase names and the short names used by the
    /// dashboard and the persisted blob (`tell_primark`, `ras`, `s_and_d`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let metric = match name.trim() {
            "customerSatisfaction" | "customer_satisfaction" | "tellPrimark" | "tell_primark" => {
                KpiMetric::CustomerSatisfaction
            }
            "reusableBagSales" | "reusable_bag_sales" | "reusableBags" | "reusable_bags" => {
                KpiMetric::ReusableBagSales
            }
            "rateOfSale" | "rate_of_sale" | "ras" => KpiMetric::RateOfSale,
            "soiledAndDamagedRate" | "soiled_and_damaged_rate" | "soiledDamaged" | "s_and_d" => {
                KpiMetric::SoiledAndDamagedRate
            }
            "stockOnHand" | "stock_on_hand" | "soh" => KpiMetric::StockOnHand,
            "storeVsDepotAvailability" | "store_vs_depot_availability" | "storeVsDepot"
            | "store_vs_depot" | "noos" => KpiMetric::StoreVsDepotAvailability,
            "growth" | "growthPercent" | "growth_up" => KpiMetric::Growth,
            "budget" => KpiMetric::Budget,
            "lastYearSales" | "lastYear" | "last_year" => KpiMetric::LastYearSales,
            _ => return None,
        };
        Some(metric)
    }

    pub fn name(self) -> &'static str {
        match self {
            KpiMetric::CustomerSatisfaction => "customerSatisfaction",
            KpiMetric::ReusableBagSales => "reusableBagSales",
            KpiMetric::RateOfSale => "rateOfSale",
            KpiMetric::SoiledAndDamagedRate => "soiledAndDamagedRate",
            KpiMetric::StockOnHand => "stockOnHand",
            KpiMetric::StoreVsDepotAvailability => "storeVsDepotAvailability",
            KpiMetric::Growth => "growth",
            KpiMetric::Budget => "budget",
            KpiMetric::LastYearSales => "lastYearSales",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KpiMetric::CustomerSatisfaction => "Tell Primark",
            KpiMetric::ReusableBagSales => "Reusable Bags",
            KpiMetric::RateOfSale => "RAS",
            KpiMetric::SoiledAndDamagedRate => "S&D",
            KpiMetric::StockOnHand => "SOH",
            KpiMetric::StoreVsDepotAvailability => "NOOS",
            KpiMetric::Growth => "Growth",
            KpiMetric::Budget => "Budget",
            KpiMetric::LastYearSales => "Last Year",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            KpiMetric::RateOfSale | KpiMetric::SoiledAndDamagedRate => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }

    /// Best-first ordering for rankings.
    pub fn natural_order(self) -> SortOrder {
        match self.direction() {
            Direction::HigherIsBetter => SortOrder::Descending,
            Direction::LowerIsBetter => SortOrder::Ascending,
        }
    }

    pub fn is_percentage(self) -> bool {
        matches!(
            self,
            KpiMetric::CustomerSatisfaction
                | KpiMetric::RateOfSale
                | KpiMetric::SoiledAndDamagedRate
                | KpiMetric::StoreVsDepotAvailability
                | KpiMetric::Growth
        )
    }

    /// Reads the metric from a record. Undefined growth reads as `0`.
    pub fn value_of(self, store: &StoreRecord) -> f64 {
        match self {
            KpiMetric::CustomerSatisfaction => store.customer_satisfaction,
            KpiMetric::ReusableBagSales => store.reusable_bag_sales as f64,
            KpiMetric::RateOfSale => store.rate_of_sale,
            KpiMetric::SoiledAndDamagedRate => store.soiled_and_damaged_rate,
            KpiMetric::StockOnHand => store.stock_on_hand as f64,
            KpiMetric::StoreVsDepotAvailability => store.store_vs_depot_availability,
            KpiMetric::Growth => {
                compute_growth(store.sales.budget, store.sales.last_year).value_or_zero()
            }
            KpiMetric::Budget => store.sales.budget,
            KpiMetric::LastYearSales => store.sales.last_year,
        }
    }
}

impl std::fmt::Display for KpiMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for metric in KpiMetric::ALL {
            assert_eq!(KpiMetric::from_name(metric.name()), Some(metric));
        }
    }

    #[test]
    fn test_legacy_names() {
        assert_eq!(KpiMetric::from_name("tell_primark"), Some(KpiMetric::CustomerSatisfaction));
        assert_eq!(KpiMetric::from_name("ras"), Some(KpiMetric::RateOfSale));
        assert_eq!(KpiMetric::from_name("soiledDamaged"), Some(KpiMetric::SoiledAndDamagedRate));
        assert_eq!(KpiMetric::from_name("soh"), Some(KpiMetric::StockOnHand));
        assert_eq!(KpiMetric::from_name("turnover"), None);
    }

    #[test]
    fn test_direction() {
        assert_eq!(KpiMetric::RateOfSale.natural_order(), SortOrder::Ascending);
        assert_eq!(KpiMetric::SoiledAndDamagedRate.direction(), Direction::LowerIsBetter);
        assert_eq!(KpiMetric::CustomerSatisfaction.natural_order(), SortOrder::Descending);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&KpiMetric::StoreVsDepotAvailability).unwrap();
        assert_eq!(json, "\"storeVsDepotAvailability\"");
    }
}
