use anyhow::Result;
use chrono::{DateTime, Utc};
use contracts::domain::a001_store::StoreRecord;
use contracts::shared::kpi::compute_store_kpis;

pub const CSV_HEADERS: [&str; 10] = [
    "Store",
    "Budget",
    "Last Year",
    "Growth %",
    "Tell Primark %",
    "Reusable Bags",
    "RAS %",
    "S&D %",
    "SOH",
    "NOOS %",
];

/// Stores table as CSV, one row per store in dataset order.
///
/// Growth is left blank when last-year sales are zero.
pub fn stores_to_csv(stores: &[StoreRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for store in stores {
        let kpis = compute_store_kpis(store);
        writer.write_record([
            store.name.clone(),
            store.sales.budget.to_string(),
            store.sales.last_year.to_string(),
            kpis.growth.percent().map(|g| g.to_string()).unwrap_or_default(),
            store.customer_satisfaction.to_string(),
            store.reusable_bag_sales.to_string(),
            store.rate_of_sale.to_string(),
            store.soiled_and_damaged_rate.to_string(),
            store.stock_on_hand.to_string(),
            store.store_vs_depot_availability.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("csv flush failed: {}", e.error()))
}

pub fn csv_file_name(now: DateTime<Utc>) -> String {
    format!("retail_kpis_{}.csv", now.format("%Y-%m-%d"))
}
