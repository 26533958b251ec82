//! Rule-based action suggestions for the network and for single stores.

use serde::{Deserialize, Serialize};

use super::aggregate::{compute_aggregate_kpis, KpiError};
use super::growth::compute_growth;
use super::metric::KpiMetric;
use super::ranking::top_stores;
use crate::domain::a001_store::StoreRecord;

const LOW_SATISFACTION: f64 = 75.0;
const HIGH_SATISFACTION: f64 = 90.0;
const HIGH_SOILED_DAMAGED: f64 = 6.0;
const HIGH_RATE_OF_SALE: f64 = 8.0;
const LOW_STORE_VS_DEPOT: f64 = 40.0;
const LOW_STOCK_ON_HAND: u64 = 150;
const LOW_BAGS_SHARE: f64 = 0.7;
const STORE_GROWTH_TARGET: f64 = 10.0;
const NETWORK_GROWTH_EXCELLENT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub message: String,
}

impl Recommendation {
    fn new(priority: Priority, category: &str, message: String) -> Self {
        Self {
            priority,
            category: category.to_string(),
            message,
        }
    }
}

fn name_list(stores: &[&StoreRecord]) -> String {
    stores
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unrounded mean reusable-bag sales; `None` for no stores.
pub fn bag_average(stores: &[StoreRecord]) -> Option<f64> {
    if stores.is_empty() {
        return None;
    }
    Some(stores.iter().map(|s| s.reusable_bag_sales as f64).sum::<f64>() / stores.len() as f64)
}

/// Network-level findings followed by best practices and a summary.
pub fn analyze_network(stores: &[StoreRecord]) -> Result<Vec<Recommendation>, KpiError> {
    let network = compute_aggregate_kpis(stores)?;
    let mut out = Vec::new();

    let low_satisfaction: Vec<_> = stores
        .iter()
        .filter(|s| s.customer_satisfaction < LOW_SATISFACTION)
        .collect();
    if !low_satisfaction.is_empty() {
        out.push(Recommendation::new(
            Priority::High,
            "Customer Satisfaction",
            format!(
                "{} store(s) score below {}% on Tell Primark: {}. Review checkout waiting times, staff training and the overall customer experience.",
                low_satisfaction.len(),
                LOW_SATISFACTION,
                name_list(&low_satisfaction)
            ),
        ));
    }

    let high_damage: Vec<_> = stores
        .iter()
        .filter(|s| s.soiled_and_damaged_rate > HIGH_SOILED_DAMAGED)
        .collect();
    if !high_damage.is_empty() {
        out.push(Recommendation::new(
            Priority::High,
            "Soiled & Damaged",
            format!(
                "{} store(s) exceed {}% S&D: {}. Improve stock handling and backroom storage.",
                high_damage.len(),
                HIGH_SOILED_DAMAGED,
                name_list(&high_damage)
            ),
        ));
    }

    let mean_bags = bag_average(stores).unwrap_or_default();
    let low_bags: Vec<_> = stores
        .iter()
        .filter(|s| (s.reusable_bag_sales as f64) < mean_bags * LOW_BAGS_SHARE)
        .collect();
    if !low_bags.is_empty() {
        out.push(Recommendation::new(
            Priority::Medium,
            "Sustainability",
            format!(
                "{} store(s) sell fewer reusable bags than the network average: {}. Raise visibility at the till and coach suggestive selling.",
                low_bags.len(),
                name_list(&low_bags)
            ),
        ));
    }

    let low_depot: Vec<_> = stores
        .iter()
        .filter(|s| s.store_vs_depot_availability < LOW_STORE_VS_DEPOT)
        .collect();
    if !low_depot.is_empty() {
        out.push(Recommendation::new(
            Priority::Medium,
            "Stock Availability",
            format!(
                "{} store(s) have NOOS below {}%: {}. Review replenishment and coordinate with the depot.",
                low_depot.len(),
                LOW_STORE_VS_DEPOT,
                name_list(&low_depot)
            ),
        ));
    }

    let top = top_stores(stores, KpiMetric::CustomerSatisfaction, 3);
    out.push(Recommendation::new(
        Priority::Low,
        "Best Practices",
        format!(
            "Top stores by Tell Primark: {}. Share their practices with the rest of the network.",
            top.iter()
                .map(|s| format!("{} ({}%)", s.name, s.customer_satisfaction))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    ));

    let growth = network.growth.value_or_zero();
    let verdict = if growth > NETWORK_GROWTH_EXCELLENT {
        "Excellent performance."
    } else {
        "There is room to improve sales."
    };
    out.push(Recommendation::new(
        Priority::Low,
        "Summary",
        format!(
            "Network average Tell Primark is {:.1}% with {:.1}% growth vs last year. {}",
            network.avg_customer_satisfaction, growth, verdict
        ),
    ));

    Ok(out)
}

/// Findings for one store; `network_bag_average` is the mean reusable-bag
/// sales of the dataset it belongs to.
pub fn analyze_store(store: &StoreRecord, network_bag_average: f64) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if store.customer_satisfaction < LOW_SATISFACTION {
        out.push(Recommendation::new(
            Priority::High,
            "Customer Satisfaction",
            format!(
                "Tell Primark is {}%, below the 80% target. Reduce checkout queues, improve size availability and train the team in customer service.",
                store.customer_satisfaction
            ),
        ));
    } else if store.customer_satisfaction >= HIGH_SATISFACTION {
        out.push(Recommendation::new(
            Priority::Low,
            "Customer Satisfaction",
            format!(
                "Tell Primark is {}%. Keep the focus on customer experience and share what works.",
                store.customer_satisfaction
            ),
        ));
    }

    if store.soiled_and_damaged_rate > HIGH_SOILED_DAMAGED {
        out.push(Recommendation::new(
            Priority::High,
            "Soiled & Damaged",
            format!(
                "S&D is {}%, above the 5% target. Review handling at receiving and backroom storage.",
                store.soiled_and_damaged_rate
            ),
        ));
    }

    if store.rate_of_sale > HIGH_RATE_OF_SALE {
        out.push(Recommendation::new(
            Priority::Medium,
            "Rate of Sale",
            format!(
                "RAS is {}%, above the 5% target. Review pricing and slow-moving lines.",
                store.rate_of_sale
            ),
        ));
    }

    if (store.reusable_bag_sales as f64) < network_bag_average * LOW_BAGS_SHARE {
        out.push(Recommendation::new(
            Priority::Medium,
            "Sustainability",
            format!(
                "Reusable bag sales ({}) are below the network average ({:.0}).",
                store.reusable_bag_sales, network_bag_average
            ),
        ));
    }

    if store.store_vs_depot_availability < LOW_STORE_VS_DEPOT {
        out.push(Recommendation::new(
            Priority::High,
            "Stock Availability",
            format!(
                "NOOS is {}%, below the 50% target. Review daily replenishment and recurring stock-outs.",
                store.store_vs_depot_availability
            ),
        ));
    }

    if store.stock_on_hand < LOW_STOCK_ON_HAND {
        out.push(Recommendation::new(
            Priority::Medium,
            "Stock Level",
            format!(
                "SOH is {} units. Review the demand forecast and inter-store transfers.",
                store.stock_on_hand
            ),
        ));
    }

    match compute_growth(store.sales.budget, store.sales.last_year).percent() {
        Some(g) if g >= STORE_GROWTH_TARGET => out.push(Recommendation::new(
            Priority::Low,
            "Sales Growth",
            format!("Growth of {:.1}% vs last year. Keep the momentum.", g),
        )),
        Some(g) => out.push(Recommendation::new(
            Priority::Medium,
            "Sales Growth",
            format!(
                "Growth vs last year is {:.1}%. Review local competition, product mix and visual merchandising.",
                g
            ),
        )),
        None => out.push(Recommendation::new(
            Priority::Low,
            "Sales Growth",
            "No last-year sales recorded; growth cannot be assessed.".to_string(),
        )),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_store::aggregate::sample_store;
    use crate::domain::a001_store::default_stores;

    #[test]
    fn test_network_recommendations() {
        let recs = analyze_network(&default_stores()).unwrap();
        let categories: Vec<_> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "Customer Satisfaction",
                "Sustainability",
                "Stock Availability",
                "Best Practices",
                "Summary"
            ]
        );
        assert!(recs[0].message.contains("Castellon"));
        assert!(recs[0].message.contains("Lorca"));
        assert!(recs[4].message.contains("80.5%"));
        assert!(recs[4].message.contains("room to improve"));
    }

    #[test]
    fn test_network_recommendations_empty() {
        assert_eq!(analyze_network(&[]), Err(KpiError::EmptyDataset));
    }

    #[test]
    fn test_store_recommendations() {
        let mut store = sample_store("Palma de Mallorca", 300_000.0, 250_000.0);
        store.customer_satisfaction = 90.0;
        store.soiled_and_damaged_rate = 6.5;
        store.rate_of_sale = 8.0;
        store.reusable_bag_sales = 80;
        store.store_vs_depot_availability = 55.0;
        store.stock_on_hand = 350;

        let recs = analyze_store(&store, 98.5);
        let categories: Vec<_> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["Customer Satisfaction", "Soiled & Damaged", "Sales Growth"]
        );
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[1].priority, Priority::High);
        assert!(recs[2].message.contains("20.0%"));
    }

    #[test]
    fn test_store_without_last_year() {
        let store = sample_store("New", 100.0, 0.0);
        let recs = analyze_store(&store, 60.0);
        assert!(recs
            .iter()
            .any(|r| r.category == "Sales Growth" && r.message.contains("cannot be assessed")));
    }
}
