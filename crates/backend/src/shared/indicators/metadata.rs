use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn total_budget() -> IndicatorId {
        IndicatorId::new("total_budget")
    }
    pub fn network_growth() -> IndicatorId {
        IndicatorId::new("network_growth")
    }
    pub fn avg_customer_satisfaction() -> IndicatorId {
        IndicatorId::new("avg_customer_satisfaction")
    }
    pub fn avg_rate_of_sale() -> IndicatorId {
        IndicatorId::new("avg_rate_of_sale")
    }
    pub fn avg_soiled_and_damaged() -> IndicatorId {
        IndicatorId::new("avg_soiled_and_damaged")
    }
    pub fn avg_store_vs_depot() -> IndicatorId {
        IndicatorId::new("avg_store_vs_depot")
    }
    pub fn avg_stock_on_hand() -> IndicatorId {
        IndicatorId::new("avg_stock_on_hand")
    }
    pub fn avg_reusable_bags() -> IndicatorId {
        IndicatorId::new("avg_reusable_bags")
    }
}

fn percent(decimals: u8) -> ValueFormat {
    ValueFormat::Percent { decimals }
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalogResponse {
    let indicators = vec![
        IndicatorMeta {
            id: ids::total_budget(),
            label: "Total budget".into(),
            short_label: Some("Budget".into()),
            icon: "euro".into(),
            format: ValueFormat::Money {
                currency: "€".into(),
            },
            description: Some("Sum of store budgets; previous value is last year's sales".into()),
        },
        IndicatorMeta {
            id: ids::network_growth(),
            label: "Network growth".into(),
            short_label: Some("Growth".into()),
            icon: "trending-up".into(),
            format: percent(1),
            description: Some("Summed budget over summed last-year sales".into()),
        },
        IndicatorMeta {
            id: ids::avg_customer_satisfaction(),
            label: "Tell Primark".into(),
            short_label: Some("CS".into()),
            icon: "smile".into(),
            format: percent(1),
            description: Some("Average customer satisfaction score".into()),
        },
        IndicatorMeta {
            id: ids::avg_rate_of_sale(),
            label: "Rate of sale".into(),
            short_label: Some("RAS".into()),
            icon: "activity".into(),
            format: percent(1),
            description: Some("Average rate of sale, lower is better".into()),
        },
        IndicatorMeta {
            id: ids::avg_soiled_and_damaged(),
            label: "Soiled & damaged".into(),
            short_label: Some("S&D".into()),
            icon: "package-x".into(),
            format: percent(1),
            description: Some("Average write-off rate, lower is better".into()),
        },
        IndicatorMeta {
            id: ids::avg_store_vs_depot(),
            label: "Store vs depot".into(),
            short_label: Some("NOOS".into()),
            icon: "warehouse".into(),
            format: percent(1),
            description: Some("Average NOOS availability in store vs depot".into()),
        },
        IndicatorMeta {
            id: ids::avg_stock_on_hand(),
            label: "Stock on hand".into(),
            short_label: Some("SOH".into()),
            icon: "boxes".into(),
            format: ValueFormat::Integer,
            description: None,
        },
        IndicatorMeta {
            id: ids::avg_reusable_bags(),
            label: "Reusable bags".into(),
            short_label: Some("Bags".into()),
            icon: "shopping-bag".into(),
            format: ValueFormat::Integer,
            description: None,
        },
    ];

    let sets = vec![
        IndicatorSetMeta {
            id: IndicatorSetId::new("network_overview"),
            label: "Network overview".into(),
            indicators: vec![
                ids::total_budget(),
                ids::network_growth(),
                ids::avg_customer_satisfaction(),
                ids::avg_rate_of_sale(),
            ],
            columns: 4,
        },
        IndicatorSetMeta {
            id: IndicatorSetId::new("operations"),
            label: "Operations".into(),
            indicators: vec![
                ids::avg_soiled_and_damaged(),
                ids::avg_store_vs_depot(),
                ids::avg_stock_on_hand(),
                ids::avg_reusable_bags(),
            ],
            columns: 4,
        },
    ];

    IndicatorCatalogResponse { indicators, sets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sets_reference_catalogued_indicators() {
        let catalog = build_catalog();
        let known: HashSet<_> = catalog.indicators.iter().map(|m| m.id.clone()).collect();
        assert_eq!(known.len(), catalog.indicators.len());
        for set in &catalog.sets {
            for id in &set.indicators {
                assert!(known.contains(id), "{} not in catalogue", id.0);
            }
        }
    }
}
