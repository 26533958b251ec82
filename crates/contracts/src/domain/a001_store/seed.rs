use super::aggregate::{SalesFigures, StoreRecord};

struct SeedRow {
    name: &'static str,
    budget: f64,
    last_year: f64,
    soh: u64,
    reusable_bags: u64,
    tell_primark: f64,
    store_vs_depot: f64,
    ras: f64,
    s_and_d: f64,
}

const SEED: &[SeedRow] = &[
    SeedRow { name: "Murcia", budget: 1_600_000.0, last_year: 1_800_000.0, soh: 180, reusable_bags: 40, tell_primark: 75.0, store_vs_depot: 35.0, ras: 8.0, s_and_d: 0.3 },
    SeedRow { name: "Cartagena", budget: 1_200_000.0, last_year: 1_300_000.0, soh: 180, reusable_bags: 250, tell_primark: 100.0, store_vs_depot: 40.0, ras: 10.0, s_and_d: 0.18 },
    SeedRow { name: "Alicante", budget: 1_500_000.0, last_year: 1_100_000.0, soh: 200, reusable_bags: 60, tell_primark: 80.0, store_vs_depot: 45.0, ras: 7.0, s_and_d: 0.11 },
    SeedRow { name: "Castellon", budget: 1_000_000.0, last_year: 850_000.0, soh: 150, reusable_bags: 50, tell_primark: 70.0, store_vs_depot: 38.0, ras: 6.0, s_and_d: 0.08 },
    SeedRow { name: "Valencia Ruzafa", budget: 250_000.0, last_year: 200_000.0, soh: 300, reusable_bags: 70, tell_primark: 85.0, store_vs_depot: 50.0, ras: 9.0, s_and_d: 0.4 },
    SeedRow { name: "Valencia Bonaire", budget: 2_400_000.0, last_year: 2_100_000.0, soh: 280, reusable_bags: 65, tell_primark: 88.0, store_vs_depot: 48.0, ras: 7.0, s_and_d: 0.5 },
    SeedRow { name: "Palma de Mallorca", budget: 300_000.0, last_year: 250_000.0, soh: 350, reusable_bags: 80, tell_primark: 90.0, store_vs_depot: 55.0, ras: 8.0, s_and_d: 6.0 },
    SeedRow { name: "Plaza Cataluña", budget: 300_000.0, last_year: 270_000.0, soh: 400, reusable_bags: 75, tell_primark: 92.0, store_vs_depot: 60.0, ras: 9.0, s_and_d: 0.7 },
    SeedRow { name: "Orihuela", budget: 90_000.0, last_year: 80_000.0, soh: 140, reusable_bags: 45, tell_primark: 65.0, store_vs_depot: 42.0, ras: 6.0, s_and_d: 0.6 },
    SeedRow { name: "Lorca", budget: 950_000.0, last_year: 1_500_000.0, soh: 90, reusable_bags: 250, tell_primark: 60.0, store_vs_depot: 30.0, ras: 5.0, s_and_d: 0.2 },
];

/// Built-in dataset used on first start and after a reset.
pub fn default_stores() -> Vec<StoreRecord> {
    SEED.iter()
        .map(|row| StoreRecord {
            name: row.name.to_string(),
            sales: SalesFigures {
                budget: row.budget,
                last_year: row.last_year,
            },
            stock_on_hand: row.soh,
            reusable_bag_sales: row.reusable_bags,
            customer_satisfaction: row.tell_primark,
            store_vs_depot_availability: row.store_vs_depot,
            rate_of_sale: row.ras,
            soiled_and_damaged_rate: row.s_and_d,
            measured_units_per_transaction: None,
        })
        .collect()
}
