use anyhow::Result;
use contracts::domain::a001_store::StoreRecord;
use contracts::shared::spreadsheet::{
    CellAddress, NormalizationRule, SheetField, BAG_UNITS_PER_PERCENT, STORE_SHEET_SCHEMA,
};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::HashSet;

pub const TEMPLATE_FILE_NAME: &str = "retail_kpis_template.xlsx";

const MAX_SHEET_NAME: usize = 31;

/// Excel sheet names cannot hold `[]:*?/\`, cannot start or end with an
/// apostrophe and are at most 31 chars.
fn sheet_name(store_name: &str) -> String {
    let mut name: String = store_name
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    if name.starts_with('\'') {
        name.replace_range(..1, "_");
    }
    if name.ends_with('\'') {
        name.pop();
        name.push('_');
    }
    if name.trim().is_empty() {
        name = "Store".to_string();
    }
    name
}

/// Sheet names for `stores`, in order, unique under Excel's case-insensitive
/// comparison. Clashes get a ` (n)` suffix and stay within 31 chars.
fn unique_sheet_names(stores: &[StoreRecord]) -> Vec<String> {
    let mut used = HashSet::new();
    stores
        .iter()
        .map(|store| {
            let base = sheet_name(&store.name);
            let mut candidate = base.clone();
            let mut n = 2;
            while !used.insert(candidate.to_lowercase()) {
                let suffix = format!(" ({n})");
                let keep = MAX_SHEET_NAME - suffix.chars().count();
                candidate = base.chars().take(keep).collect::<String>() + &suffix;
                n += 1;
            }
            candidate
        })
        .collect()
}

/// Value the import side maps back onto the store, for each bound cell.
fn field_value(store: &StoreRecord, field: SheetField) -> Option<f64> {
    let budget = store.sales.budget;
    match field {
        SheetField::Sales => Some(budget),
        SheetField::LastYearRatio => {
            (store.sales.last_year > 0.0).then(|| budget / store.sales.last_year)
        }
        SheetField::BudgetRatio => Some(1.0),
        SheetField::UnitsPerTransaction => store.measured_units_per_transaction,
        SheetField::StoreVsDepot => Some(store.store_vs_depot_availability),
        SheetField::ReusableBagsPercent => {
            Some(store.reusable_bag_sales as f64 / BAG_UNITS_PER_PERCENT)
        }
        SheetField::StockOnHand => Some(store.stock_on_hand as f64),
        SheetField::RateOfSale => Some(store.rate_of_sale),
        SheetField::CustomerSatisfaction => Some(store.customer_satisfaction),
    }
}

fn write_store_sheet(
    ws: &mut Worksheet,
    name: &str,
    store: &StoreRecord,
    bold: &Format,
) -> Result<()> {
    ws.set_name(name)?;
    ws.write_string_with_format(0, 0, &store.name, bold)?;

    for binding in STORE_SHEET_SCHEMA {
        let addr = CellAddress::parse(binding.address)?;
        let (row, col) = (addr.row, addr.col as u16);
        ws.write_string(row, col - 1, binding.label)?;

        let Some(value) = field_value(store, binding.field) else {
            continue;
        };
        // fractions in percent cells would be rescaled on import
        if binding.rule == NormalizationRule::FractionOrPercent && value > 0.0 && value < 1.0 {
            ws.write_string(row, col, format!("{value}%"))?;
        } else {
            ws.write_number(row, col, value)?;
        }
    }
    Ok(())
}

/// One sheet per store in the fixed import layout, store name in A1.
///
/// Importing the result yields the same figures, with soiled & damaged set to
/// the configured default. Names are read back from the sheet name, so a
/// store keeps its name only when the sheet name is unchanged (no sanitizing,
/// truncation or ` (n)` suffix), is not a store-directory key and passes
/// `is_store_sheet`.
pub fn build_template(stores: &[StoreRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for (store, name) in stores.iter().zip(unique_sheet_names(stores)) {
        write_store_sheet(workbook.add_worksheet(), &name, store, &bold)?;
    }

    Ok(workbook.save_to_buffer()?)
}
