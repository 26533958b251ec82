pub mod executor;
pub mod template;
pub mod workbook_reader;

pub use executor::ImportExecutor;
