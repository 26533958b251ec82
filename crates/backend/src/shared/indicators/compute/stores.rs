use anyhow::Result;
use contracts::domain::a001_store::StoreRecord;
use contracts::shared::indicators::*;
use contracts::shared::kpi::{
    classify_metric, classify_network_growth, compute_aggregate_kpis, KpiMetric, NetworkKpis,
};

use crate::shared::format::format_currency;
use crate::shared::indicators::metadata::ids;

fn network(stores: &[StoreRecord]) -> Result<NetworkKpis> {
    Ok(compute_aggregate_kpis(stores)?)
}

fn simple(id: IndicatorId, value: f64, status: IndicatorStatus) -> IndicatorValue {
    IndicatorValue {
        id,
        value: Some(value),
        previous_value: None,
        change_percent: None,
        status,
        subtitle: None,
    }
}

pub fn compute_total_budget(stores: &[StoreRecord]) -> Result<IndicatorValue> {
    let n = network(stores)?;
    Ok(IndicatorValue {
        id: ids::total_budget(),
        value: Some(n.total_budget),
        previous_value: Some(n.total_last_year),
        change_percent: n.growth.percent(),
        status: IndicatorStatus::Neutral,
        subtitle: Some(format!("LY {}", format_currency(n.total_last_year))),
    })
}

pub fn compute_network_growth(stores: &[StoreRecord]) -> Result<IndicatorValue> {
    let n = network(stores)?;
    let value = n.growth.percent();
    Ok(IndicatorValue {
        id: ids::network_growth(),
        value,
        previous_value: None,
        change_percent: None,
        status: value
            .map(classify_network_growth)
            .unwrap_or(IndicatorStatus::Neutral),
        subtitle: value
            .is_none()
            .then(|| "No last-year sales to compare".to_string()),
    })
}

pub fn compute_avg_customer_satisfaction(stores: &[StoreRecord]) -> Result<IndicatorValue> {
    let v = network(stores)?.avg_customer_satisfaction;
    Ok(simple(
        ids::avg_customer_satisfaction(),
        v,
        classify_metric(KpiMetric::CustomerSatisfaction, v),
    ))
}

pub fn compute_avg_rate_of_sale(stores: &[StoreRecord]) -> Result<IndicatorValue> {
    let v = network(stores)?.avg_rate_of_sale;
    Ok(simple(
        ids::avg_rate_of_sale(),
        v,
        classify_metric(KpiMetric::RateOfSale, v),
    ))
}

pub fn compute_avg_soiled_and_damaged(stores: &[StoreRecord]) -> Result<IndicatorValue> {
    let v = network(stores)?.avg_soiled_and_damaged_rate;
    Ok(simple(
        ids::avg_soiled_and_damaged(),
        v,
        classify_metric(KpiMetric::SoiledAndDamagedRate, v),
    ))
}

pub fn compute_avg_store_vs_depot(stores: &[StoreRecord]) -> Result<IndicatorValue> {
    let v = network(stores)?.avg_store_vs_depot_availability;
    Ok(simple(
        ids::avg_store_vs_depot(),
        v,
        classify_metric(KpiMetric::StoreVsDepotAvailability, v),
    ))
}

pub fn compute_avg_stock_on_hand(stores: &[StoreRecord]) -> Result<IndicatorValue> {
    let v = network(stores)?.avg_stock_on_hand as f64;
    Ok(simple(ids::avg_stock_on_hand(), v, IndicatorStatus::Neutral))
}

pub fn compute_avg_reusable_bags(stores: &[StoreRecord]) -> Result<IndicatorValue> {
    let v = network(stores)?.avg_reusable_bag_sales as f64;
    Ok(simple(ids::avg_reusable_bags(), v, IndicatorStatus::Neutral))
}
