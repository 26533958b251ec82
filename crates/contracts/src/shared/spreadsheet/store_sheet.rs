use std::collections::HashMap;
use thiserror::Error;

use super::cell_address::{CellAddress, CellAddressError};
use super::normalize::{normalize, CellValue};
use super::schema::{binding_for, SheetField, STORE_SHEET_SCHEMA};
use crate::domain::a001_store::{SalesFigures, StoreRecord};

/// S&D is not part of the sheet layout; imported stores get this value.
pub const DEFAULT_SOILED_DAMAGED: f64 = 5.0;
/// Reusable bag units assumed when the attainment cell is empty.
pub const DEFAULT_REUSABLE_BAGS: u64 = 50;
/// Units per percentage point of reusable-bag attainment.
pub const BAG_UNITS_PER_PERCENT: f64 = 2.0;

/// Read access to one worksheet.
pub trait CellSource {
    fn cell(&self, address: CellAddress) -> CellValue;
}

impl CellSource for HashMap<CellAddress, CellValue> {
    fn cell(&self, address: CellAddress) -> CellValue {
        self.get(&address).cloned().unwrap_or(CellValue::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    #[error(transparent)]
    Address(#[from] CellAddressError),

    #[error("required cell {address} ({field:?}) is empty or not a number")]
    MissingRequired {
        address: &'static str,
        field: SheetField,
    },
}

/// Store number → display name, for sheets named after the store number.
#[derive(Debug, Clone, Default)]
pub struct StoreDirectory {
    names: HashMap<String, String>,
}

impl StoreDirectory {
    /// Directory of the stores in the area-manager workbook.
    pub fn with_defaults() -> Self {
        let names = [
            ("312", "Lorca"),
            ("365", "Orihuela"),
            ("369", "Ruzafa"),
            ("371", "Castellón"),
            ("377", "Alicante"),
            ("381", "Valencia Bonaire"),
            ("383", "Cartagena"),
            ("389", "Valencia Ruzafa"),
            ("396", "Murcia"),
            ("399", "Palma de Mallorca"),
            ("412", "Plaza Cataluña"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { names }
    }

    /// Adds or replaces entries.
    pub fn extend(&mut self, names: HashMap<String, String>) {
        self.names.extend(names);
    }

    pub fn resolve(&self, sheet_name: &str) -> String {
        let key = sheet_name.trim();
        self.names
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Placeholder and template sheets are not stores.
pub fn is_store_sheet(sheet_name: &str) -> bool {
    let lower = sheet_name.trim().to_lowercase();
    !(lower.contains("hoja") || lower.contains("sheet") || lower == "template")
}

#[derive(Debug, Clone)]
pub struct StoreSheetOptions {
    pub directory: StoreDirectory,
    pub soiled_damaged_default: f64,
}

impl Default for StoreSheetOptions {
    fn default() -> Self {
        Self {
            directory: StoreDirectory::with_defaults(),
            soiled_damaged_default: DEFAULT_SOILED_DAMAGED,
        }
    }
}

fn read(source: &impl CellSource, field: SheetField) -> Result<Option<f64>, SheetError> {
    let Some(binding) = binding_for(field) else {
        return Ok(None);
    };
    let address = CellAddress::parse(binding.address)?;
    let value = normalize(&source.cell(address), binding.rule);
    match value {
        None if binding.required => Err(SheetError::MissingRequired {
            address: binding.address,
            field,
        }),
        v => Ok(v),
    }
}

/// `sales / ratio`, rounded; falls back to `sales` for a missing or zero ratio.
fn from_ratio(sales: f64, ratio: Option<f64>) -> f64 {
    match ratio {
        Some(r) if r != 0.0 => (sales / r).round(),
        _ => sales,
    }
}

fn non_negative_units(v: Option<f64>) -> u64 {
    v.filter(|x| *x > 0.0).map(|x| x as u64).unwrap_or(0)
}

/// Maps one store sheet onto a record following [`STORE_SHEET_SCHEMA`].
pub fn map_store_sheet(
    sheet_name: &str,
    source: &impl CellSource,
    options: &StoreSheetOptions,
) -> Result<StoreRecord, SheetError> {
    // validate the whole layout up front so a bad address fails every sheet alike
    for binding in STORE_SHEET_SCHEMA {
        CellAddress::parse(binding.address)?;
    }

    let sales = read(source, SheetField::Sales)?.unwrap_or_default();
    let last_year = from_ratio(sales, read(source, SheetField::LastYearRatio)?);
    let budget = from_ratio(sales, read(source, SheetField::BudgetRatio)?);

    let reusable_bag_sales = match read(source, SheetField::ReusableBagsPercent)? {
        Some(pct) if pct != 0.0 => non_negative_units(Some((pct * BAG_UNITS_PER_PERCENT).round())),
        _ => DEFAULT_REUSABLE_BAGS,
    };

    Ok(StoreRecord {
        name: options.directory.resolve(sheet_name),
        sales: SalesFigures { budget, last_year },
        stock_on_hand: non_negative_units(read(source, SheetField::StockOnHand)?),
        reusable_bag_sales,
        customer_satisfaction: read(source, SheetField::CustomerSatisfaction)?.unwrap_or(0.0),
        store_vs_depot_availability: read(source, SheetField::StoreVsDepot)?.unwrap_or(0.0),
        rate_of_sale: read(source, SheetField::RateOfSale)?.unwrap_or(0.0),
        soiled_and_damaged_rate: options.soiled_damaged_default,
        measured_units_per_transaction: read(source, SheetField::UnitsPerTransaction)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[(&str, CellValue)]) -> HashMap<CellAddress, CellValue> {
        cells
            .iter()
            .map(|(a, v)| (CellAddress::parse(a).unwrap(), v.clone()))
            .collect()
    }

    fn num(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    #[test]
    fn test_map_full_sheet() {
        let cells = sheet(&[
            ("B4", num(960_000.0)),
            ("D4", num(0.96)),
            ("H4", num(0.8)),
            ("B8", num(2.4)),
            ("B20", num(0.942)),
            ("N16", num(0.4907)),
            ("N20", num(1520.0)),
            ("R20", CellValue::Text("7,5".into())),
            ("R24", CellValue::Text("86,9%".into())),
        ]);
        let store = map_store_sheet("312", &cells, &StoreSheetOptions::default()).unwrap();

        assert_eq!(store.name, "Lorca");
        assert_eq!(store.sales.last_year, 1_000_000.0);
        assert_eq!(store.sales.budget, 1_200_000.0);
        assert_eq!(store.measured_units_per_transaction, Some(2.4));
        assert_eq!(store.store_vs_depot_availability, 94.2);
        assert_eq!(store.reusable_bag_sales, 98);
        assert_eq!(store.stock_on_hand, 1520);
        assert_eq!(store.rate_of_sale, 7.5);
        assert_eq!(store.customer_satisfaction, 86.9);
        assert_eq!(store.soiled_and_damaged_rate, DEFAULT_SOILED_DAMAGED);
    }

    #[test]
    fn test_missing_optional_cells_use_fallbacks() {
        let cells = sheet(&[("B4", num(500_000.0))]);
        let store = map_store_sheet("Gandia", &cells, &StoreSheetOptions::default()).unwrap();

        assert_eq!(store.name, "Gandia");
        assert_eq!(store.sales.budget, 500_000.0);
        assert_eq!(store.sales.last_year, 500_000.0);
        assert_eq!(store.reusable_bag_sales, DEFAULT_REUSABLE_BAGS);
        assert_eq!(store.stock_on_hand, 0);
        assert_eq!(store.customer_satisfaction, 0.0);
        assert_eq!(store.measured_units_per_transaction, None);
    }

    #[test]
    fn test_zero_ratio_falls_back_to_sales() {
        let cells = sheet(&[("B4", num(100.0)), ("D4", num(0.0))]);
        let store = map_store_sheet("X", &cells, &StoreSheetOptions::default()).unwrap();
        assert_eq!(store.sales.last_year, 100.0);
    }

    #[test]
    fn test_missing_sales_is_rejected() {
        let cells = sheet(&[("D4", num(0.96)), ("B4", CellValue::Text("n/a".into()))]);
        let err = map_store_sheet("396", &cells, &StoreSheetOptions::default()).unwrap_err();
        assert_eq!(
            err,
            SheetError::MissingRequired {
                address: "B4",
                field: SheetField::Sales
            }
        );
    }

    #[test]
    fn test_sheet_filter() {
        assert!(is_store_sheet("396"));
        assert!(is_store_sheet("Murcia"));
        assert!(!is_store_sheet("Hoja1"));
        assert!(!is_store_sheet("Sheet2"));
        assert!(!is_store_sheet("Template"));
    }

    #[test]
    fn test_directory_override() {
        let mut dir = StoreDirectory::with_defaults();
        dir.extend(HashMap::from([("369".to_string(), "Valencia Centro".to_string())]));
        assert_eq!(dir.resolve("369"), "Valencia Centro");
        assert_eq!(dir.resolve(" 396 "), "Murcia");
        assert_eq!(dir.resolve("500"), "500");
    }
}
