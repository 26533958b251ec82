use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::growth::{compute_growth, round1, GrowthResult};
use crate::domain::a001_store::StoreRecord;

/// Assumed average ticket, in euros, behind the UPT estimate.
pub const AVERAGE_TRANSACTION_VALUE: f64 = 45.0;
/// Assumed units per transaction behind the UPT estimate.
pub const AVERAGE_UNITS_PER_TRANSACTION: f64 = 2.5;

const UPT_BASIS: &str = "budget / €45 average ticket × 2.5 units per ticket";
const SCO_BASIS: &str = "display placeholder, 40-70%";

/// A display heuristic, never business ground truth.
///
/// Serialized with its basis so a renderer cannot show it as measured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimated<T> {
    pub value: T,
    pub basis: String,
}

impl<T> Estimated<T> {
    pub fn new(value: T, basis: &str) -> Self {
        Self {
            value,
            basis: basis.to_string(),
        }
    }
}

/// KPIs derived from one store record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedKpiSet {
    pub name: String,
    pub growth: GrowthResult,
    pub budget_vs_last_year: GrowthResult,
    /// `None` when the budget is too small to yield a single transaction.
    pub estimated_units_per_transaction: Option<Estimated<f64>>,
    pub measured_units_per_transaction: Option<f64>,
    /// Only filled by [`compute_store_kpis_with`].
    pub self_checkout_usage: Option<Estimated<f64>>,
    pub budget: f64,
    pub last_year: f64,
    pub customer_satisfaction: f64,
    pub reusable_bag_sales: u64,
    pub rate_of_sale: f64,
    pub soiled_and_damaged_rate: f64,
    pub stock_on_hand: u64,
    pub store_vs_depot_availability: f64,
}

/// Source of the randomized display-only estimates.
pub trait EstimateSource {
    /// Self-checkout usage in percent.
    fn self_checkout_usage(&mut self, store: &StoreRecord) -> f64;
}

/// Reproducible estimates for a given seed.
///
/// Each store draws from its own stream keyed by seed and store name, so a
/// store gets the same value whatever else is in the response.
pub struct SeededEstimates {
    seed: u64,
}

impl SeededEstimates {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, store: &StoreRecord) -> StdRng {
        // FNV-1a, stable across builds unlike the std hasher
        let key = store.name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
            (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        });
        StdRng::seed_from_u64(self.seed ^ key)
    }
}

impl EstimateSource for SeededEstimates {
    fn self_checkout_usage(&mut self, store: &StoreRecord) -> f64 {
        self.rng_for(store).gen_range(40..=70) as f64
    }
}

/// Units per transaction implied by the budget under the fixed assumptions.
pub fn estimate_units_per_transaction(budget: f64) -> Option<Estimated<f64>> {
    let transactions = (budget / AVERAGE_TRANSACTION_VALUE).round();
    if transactions == 0.0 {
        return None;
    }
    let units = (transactions * AVERAGE_UNITS_PER_TRANSACTION).round();
    Some(Estimated::new(round1(units / transactions), UPT_BASIS))
}

/// Deterministic per-store KPIs. Raw fields are passed through unvalidated.
pub fn compute_store_kpis(store: &StoreRecord) -> DerivedKpiSet {
    let growth = compute_growth(store.sales.budget, store.sales.last_year);

    DerivedKpiSet {
        name: store.name.clone(),
        growth,
        budget_vs_last_year: growth,
        estimated_units_per_transaction: estimate_units_per_transaction(store.sales.budget),
        measured_units_per_transaction: store.measured_units_per_transaction,
        self_checkout_usage: None,
        budget: store.sales.budget,
        last_year: store.sales.last_year,
        customer_satisfaction: store.customer_satisfaction,
        reusable_bag_sales: store.reusable_bag_sales,
        rate_of_sale: store.rate_of_sale,
        soiled_and_damaged_rate: store.soiled_and_damaged_rate,
        stock_on_hand: store.stock_on_hand,
        store_vs_depot_availability: store.store_vs_depot_availability,
    }
}

/// [`compute_store_kpis`] plus the display-only estimates drawn from `source`.
pub fn compute_store_kpis_with<E: EstimateSource>(
    store: &StoreRecord,
    source: &mut E,
) -> DerivedKpiSet {
    let mut kpis = compute_store_kpis(store);
    kpis.self_checkout_usage = Some(Estimated::new(
        source.self_checkout_usage(store),
        SCO_BASIS,
    ));
    kpis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_store::aggregate::sample_store;

    #[test]
    fn test_store_kpis_growth_and_passthrough() {
        let mut store = sample_store("Alicante", 1_500_000.0, 1_100_000.0);
        store.rate_of_sale = 7.0;
        let kpis = compute_store_kpis(&store);

        assert_eq!(kpis.growth, GrowthResult::Defined(36.4));
        assert_eq!(kpis.budget_vs_last_year, kpis.growth);
        assert_eq!(kpis.rate_of_sale, 7.0);
        assert_eq!(kpis.customer_satisfaction, store.customer_satisfaction);
        assert_eq!(kpis.stock_on_hand, store.stock_on_hand);
        assert!(kpis.self_checkout_usage.is_none());
    }

    #[test]
    fn test_store_kpis_idempotent() {
        let store = sample_store("Murcia", 1_600_000.0, 1_800_000.0);
        let before = store.clone();
        assert_eq!(compute_store_kpis(&store), compute_store_kpis(&store));
        assert_eq!(store, before);
    }

    #[test]
    fn test_upt_estimate() {
        let upt = estimate_units_per_transaction(1_600_000.0).unwrap();
        assert_eq!(upt.value, 2.5);
        assert!(upt.basis.contains("€45"));
        assert!(estimate_units_per_transaction(10.0).is_none());
    }

    #[test]
    fn test_malformed_input_propagates() {
        let mut store = sample_store("Broken", f64::NAN, 100.0);
        store.customer_satisfaction = -5.0;
        let kpis = compute_store_kpis(&store);
        assert!(kpis.growth.value_or_zero().is_nan());
        assert_eq!(kpis.customer_satisfaction, -5.0);
    }

    #[test]
    fn test_seeded_estimates_are_reproducible() {
        let store = sample_store("Lorca", 950_000.0, 1_500_000.0);
        let a = compute_store_kpis_with(&store, &mut SeededEstimates::new(7));
        let b = compute_store_kpis_with(&store, &mut SeededEstimates::new(7));
        assert_eq!(a, b);

        let sco = a.self_checkout_usage.unwrap().value;
        assert!((40.0..=70.0).contains(&sco));
    }

    #[test]
    fn test_seeded_estimate_independent_of_order() {
        let lorca = sample_store("Lorca", 950_000.0, 1_500_000.0);
        let murcia = sample_store("Murcia", 1_600_000.0, 1_800_000.0);

        let mut alone = SeededEstimates::new(42);
        let single = alone.self_checkout_usage(&murcia);

        let mut listed = SeededEstimates::new(42);
        listed.self_checkout_usage(&lorca);
        let second = listed.self_checkout_usage(&murcia);
        let again = listed.self_checkout_usage(&murcia);

        assert_eq!(single, second);
        assert_eq!(second, again);
    }

    struct Fixed(f64);

    impl EstimateSource for Fixed {
        fn self_checkout_usage(&mut self, _store: &StoreRecord) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_custom_estimate_source() {
        let store = sample_store("Orihuela", 90_000.0, 80_000.0);
        let kpis = compute_store_kpis_with(&store, &mut Fixed(55.0));
        assert_eq!(kpis.self_checkout_usage.unwrap().value, 55.0);
    }
}
