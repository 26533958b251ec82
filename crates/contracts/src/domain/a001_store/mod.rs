pub mod aggregate;
pub mod excel;
pub mod seed;

pub use aggregate::{DatasetError, DatasetSource, SalesFigures, StoreDataset, StoreRecord};
pub use excel::{ImportReport, SkippedSheet};
pub use seed::default_stores;
