use anyhow::Result;
use contracts::domain::a001_store::StoreRecord;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::stores;
use super::metadata::ids;

type ComputeFn = fn(&[StoreRecord]) -> Result<IndicatorValue>;

/// Central registry: maps `IndicatorId` to its compute function.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::total_budget().0, stores::compute_total_budget);
        fns.insert(ids::network_growth().0, stores::compute_network_growth);
        fns.insert(
            ids::avg_customer_satisfaction().0,
            stores::compute_avg_customer_satisfaction,
        );
        fns.insert(ids::avg_rate_of_sale().0, stores::compute_avg_rate_of_sale);
        fns.insert(
            ids::avg_soiled_and_damaged().0,
            stores::compute_avg_soiled_and_damaged,
        );
        fns.insert(ids::avg_store_vs_depot().0, stores::compute_avg_store_vs_depot);
        fns.insert(ids::avg_stock_on_hand().0, stores::compute_avg_stock_on_hand);
        fns.insert(ids::avg_reusable_bags().0, stores::compute_avg_reusable_bags);

        Self { fns }
    }

    /// Compute a batch of indicators over the stores in scope.
    ///
    /// Unknown ids are skipped; failing ones come back empty with the error as subtitle.
    pub fn compute(&self, ids: &[IndicatorId], stores: &[StoreRecord]) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(compute_fn) = self.fns.get(&id.0) {
                match compute_fn(stores) {
                    Ok(val) => results.push(val),
                    Err(e) => {
                        tracing::warn!("indicator {} compute error: {e:#}", id.0);
                        results.push(IndicatorValue {
                            id: id.clone(),
                            value: None,
                            previous_value: None,
                            change_percent: None,
                            status: IndicatorStatus::Neutral,
                            subtitle: Some(format!("Error: {e}")),
                        });
                    }
                }
            } else {
                tracing::warn!("indicator {} not found in registry", id.0);
            }
        }

        results
    }
}
