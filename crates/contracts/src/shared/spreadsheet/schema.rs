use serde::{Deserialize, Serialize};

use super::normalize::NormalizationRule;

/// Values read from a store sheet, before derivation into a `StoreRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetField {
    /// Actual sales for the period.
    Sales,
    /// Sales as a ratio of last year's sales.
    LastYearRatio,
    /// Sales as a ratio of budget.
    BudgetRatio,
    UnitsPerTransaction,
    StoreVsDepot,
    /// Reusable-bag target attainment.
    ReusableBagsPercent,
    StockOnHand,
    RateOfSale,
    CustomerSatisfaction,
}

/// Cell address → field → normalization rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellBinding {
    pub address: &'static str,
    pub field: SheetField,
    pub rule: NormalizationRule,
    /// Label written next to the value in the template workbook.
    pub label: &'static str,
    pub required: bool,
}

const fn bind(
    address: &'static str,
    field: SheetField,
    rule: NormalizationRule,
    label: &'static str,
) -> CellBinding {
    CellBinding {
        address,
        field,
        rule,
        label,
        required: false,
    }
}

/// Fixed layout of one store sheet in the area-manager workbook.
pub const STORE_SHEET_SCHEMA: &[CellBinding] = &[
    CellBinding {
        required: true,
        ..bind("B4", SheetField::Sales, NormalizationRule::Amount, "Sales")
    },
    bind("D4", SheetField::LastYearRatio, NormalizationRule::Ratio, "LY %"),
    bind("H4", SheetField::BudgetRatio, NormalizationRule::Ratio, "Budget %"),
    bind("B8", SheetField::UnitsPerTransaction, NormalizationRule::Amount, "UPT"),
    bind("B20", SheetField::StoreVsDepot, NormalizationRule::FractionOrPercent, "NOOS"),
    bind("N16", SheetField::ReusableBagsPercent, NormalizationRule::FractionOrPercent, "Reusable Bags %"),
    bind("N20", SheetField::StockOnHand, NormalizationRule::Count, "SOH"),
    bind("R20", SheetField::RateOfSale, NormalizationRule::Percent, "RAS"),
    bind("R24", SheetField::CustomerSatisfaction, NormalizationRule::Percent, "Tell Primark"),
];

pub fn binding_for(field: SheetField) -> Option<&'static CellBinding> {
    STORE_SHEET_SCHEMA.iter().find(|b| b.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::spreadsheet::CellAddress;
    use std::collections::HashSet;

    #[test]
    fn test_schema_addresses_are_valid_and_unique() {
        let mut seen = HashSet::new();
        for b in STORE_SHEET_SCHEMA {
            let addr = CellAddress::parse(b.address).unwrap();
            assert!(seen.insert(addr), "{} bound twice", b.address);
        }
    }

    #[test]
    fn test_label_cells_do_not_overlap_values() {
        let values: HashSet<_> = STORE_SHEET_SCHEMA
            .iter()
            .map(|b| CellAddress::parse(b.address).unwrap())
            .collect();
        for b in STORE_SHEET_SCHEMA {
            let addr = CellAddress::parse(b.address).unwrap();
            let label = CellAddress::new(addr.row, addr.col - 1);
            assert!(!values.contains(&label));
        }
    }

    #[test]
    fn test_only_sales_is_required() {
        let required: Vec<_> = STORE_SHEET_SCHEMA.iter().filter(|b| b.required).collect();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0].field, SheetField::Sales);
        assert_eq!(binding_for(SheetField::Sales).unwrap().address, "B4");
    }
}
