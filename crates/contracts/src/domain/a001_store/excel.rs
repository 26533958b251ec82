use serde::{Deserialize, Serialize};

/// A workbook sheet that did not produce a store record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSheet {
    pub sheet_name: String,
    pub reason: String,
}

/// Result of a workbook import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub import_id: String,
    /// Display name of the use case that produced the report.
    pub usecase: String,
    pub file_name: String,
    pub imported_count: usize,
    /// Store names in workbook order.
    pub imported_stores: Vec<String>,
    pub skipped_sheets: Vec<SkippedSheet>,
}
