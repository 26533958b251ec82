pub mod indicators;
pub mod kpi;
pub mod spreadsheet;
