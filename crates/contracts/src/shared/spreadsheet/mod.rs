//! Reading the area-manager workbook layout into store records.
//!
//! This module is library-neutral: the backend adapts a concrete workbook
//! reader to [`CellSource`].

pub mod cell_address;
pub mod normalize;
pub mod schema;
pub mod store_sheet;

pub use cell_address::{CellAddress, CellAddressError};
pub use normalize::{normalize, parse_number, CellValue, NormalizationRule, ParsedNumber};
pub use schema::{binding_for, CellBinding, SheetField, STORE_SHEET_SCHEMA};
pub use store_sheet::{
    is_store_sheet, map_store_sheet, CellSource, SheetError, StoreDirectory, StoreSheetOptions,
    BAG_UNITS_PER_PERCENT, DEFAULT_REUSABLE_BAGS, DEFAULT_SOILED_DAMAGED,
};
