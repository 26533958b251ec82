use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::seed::default_stores;

// ---------------------------------------------------------------------------
// Store record
// ---------------------------------------------------------------------------

/// Planned and prior-year sales for the current reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesFigures {
    pub budget: f64,
    pub last_year: f64,
}

/// One retail location's metrics for the current reporting period.
///
/// Field names on the wire keep the keys used by previously persisted
/// blobs, so older snapshots deserialize unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    pub sales: SalesFigures,
    /// Units currently in store (SOH).
    #[serde(rename = "soh")]
    pub stock_on_hand: u64,
    #[serde(rename = "reusable_bags")]
    pub reusable_bag_sales: u64,
    /// Survey score, 0..=100.
    #[serde(rename = "tell_primark")]
    pub customer_satisfaction: f64,
    /// Share of NOOS lines available in store vs depot, 0..=100.
    #[serde(rename = "store_vs_depot")]
    pub store_vs_depot_availability: f64,
    /// Rate of sale (RAS), percent. Lower is better.
    #[serde(rename = "ras")]
    pub rate_of_sale: f64,
    /// Soiled & damaged write-off, percent. Lower is better.
    #[serde(rename = "s_and_d")]
    pub soiled_and_damaged_rate: f64,
    /// UPT as reported on the store sheet, when the record came from a workbook.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "upt")]
    pub measured_units_per_transaction: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dataset snapshot
// ---------------------------------------------------------------------------

/// Where the current snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSource {
    /// Built-in seed data.
    Default,
    /// Replaced by a workbook upload.
    Imported { file_name: String },
    /// Loaded back from the persisted blob.
    Restored,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("dataset contains no stores")]
    Empty,

    #[error("duplicate store name: {0}")]
    DuplicateName(String),

    #[error("store name must not be blank")]
    BlankName,

    #[error("failed to decode dataset blob: {0}")]
    Decode(String),
}

/// A complete set of store records, replaced wholesale and never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDataset {
    pub stores: Vec<StoreRecord>,
    pub source: DatasetSource,
    pub loaded_at: DateTime<Utc>,
}

impl StoreDataset {
    pub fn new(stores: Vec<StoreRecord>, source: DatasetSource) -> Self {
        Self {
            stores,
            source,
            loaded_at: Utc::now(),
        }
    }

    /// Snapshot of the built-in seed data.
    pub fn default_dataset() -> Self {
        Self::new(default_stores(), DatasetSource::Default)
    }

    /// Checks the invariants collaborators must guarantee before handing
    /// records to the engine: at least one store, non-blank unique names.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.stores.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = HashSet::with_capacity(self.stores.len());
        for store in &self.stores {
            if store.name.trim().is_empty() {
                return Err(DatasetError::BlankName);
            }
            if !seen.insert(store.name.as_str()) {
                return Err(DatasetError::DuplicateName(store.name.clone()));
            }
        }

        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&StoreRecord> {
        self.stores.iter().find(|s| s.name == name)
    }

    /// Store filter as offered by the dashboard: `None` (or "all") keeps
    /// every store, otherwise only the named one.
    pub fn filtered(&self, store: Option<&str>) -> Vec<StoreRecord> {
        match store {
            None | Some("all") | Some("") => self.stores.clone(),
            Some(name) => self
                .stores
                .iter()
                .filter(|s| s.name == name)
                .cloned()
                .collect(),
        }
    }

    /// Serializes the store list as the single persisted blob.
    ///
    /// Only the records are stored; source and timestamp are session facts.
    pub fn to_blob(&self) -> Result<String, DatasetError> {
        serde_json::to_string(&self.stores).map_err(|e| DatasetError::Decode(e.to_string()))
    }

    pub fn from_blob(blob: &str) -> Result<Self, DatasetError> {
        let stores: Vec<StoreRecord> =
            serde_json::from_str(blob).map_err(|e| DatasetError::Decode(e.to_string()))?;
        let dataset = Self::new(stores, DatasetSource::Restored);
        dataset.validate()?;
        Ok(dataset)
    }
}

#[cfg(test)]
pub(crate) fn sample_store(name: &str, budget: f64, last_year: f64) -> StoreRecord {
    StoreRecord {
        name: name.to_string(),
        sales: SalesFigures { budget, last_year },
        stock_on_hand: 200,
        reusable_bag_sales: 60,
        customer_satisfaction: 80.0,
        store_vs_depot_availability: 45.0,
        rate_of_sale: 7.0,
        soiled_and_damaged_rate: 0.5,
        measured_units_per_transaction: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dataset_is_valid() {
        let dataset = StoreDataset::default_dataset();
        assert_eq!(dataset.source, DatasetSource::Default);
        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_duplicates() {
        let empty = StoreDataset::new(vec![], DatasetSource::Default);
        assert_eq!(empty.validate(), Err(DatasetError::Empty));

        let dup = StoreDataset::new(
            vec![
                sample_store("Lorca", 100.0, 90.0),
                sample_store("Lorca", 200.0, 180.0),
            ],
            DatasetSource::Default,
        );
        assert_eq!(
            dup.validate(),
            Err(DatasetError::DuplicateName("Lorca".into()))
        );

        let blank = StoreDataset::new(vec![sample_store("  ", 1.0, 1.0)], DatasetSource::Default);
        assert_eq!(blank.validate(), Err(DatasetError::BlankName));
    }

    #[test]
    fn test_filtered() {
        let dataset = StoreDataset::new(
            vec![
                sample_store("Murcia", 100.0, 90.0),
                sample_store("Lorca", 200.0, 180.0),
            ],
            DatasetSource::Default,
        );
        assert_eq!(dataset.filtered(None).len(), 2);
        assert_eq!(dataset.filtered(Some("all")).len(), 2);
        let only = dataset.filtered(Some("Lorca"));
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].name, "Lorca");
        assert!(dataset.filtered(Some("Madrid")).is_empty());
    }

    #[test]
    fn test_blob_keeps_legacy_keys() {
        let dataset = StoreDataset::new(vec![sample_store("Murcia", 100.0, 90.0)], DatasetSource::Default);
        let blob = dataset.to_blob().unwrap();
        assert!(blob.contains("\"tell_primark\":80.0"));
        assert!(blob.contains("\"last_year\":90.0"));
        assert!(!blob.contains("upt"));

        let restored = StoreDataset::from_blob(&blob).unwrap();
        assert_eq!(restored.source, DatasetSource::Restored);
        assert_eq!(restored.stores, dataset.stores);
    }

    #[test]
    fn test_from_blob_accepts_legacy_payload() {
        let blob = r#"[{"name":"Orihuela","sales":{"budget":90000,"last_year":80000},
            "soh":140,"reusable_bags":45,"tell_primark":65,"store_vs_depot":42,
            "growth_up":6,"ras":6,"s_and_d":0.6}]"#;
        let dataset = StoreDataset::from_blob(blob).unwrap();
        assert_eq!(dataset.stores[0].stock_on_hand, 140);
        assert_eq!(dataset.stores[0].customer_satisfaction, 65.0);
    }

    #[test]
    fn test_from_blob_rejects_garbage() {
        assert!(matches!(
            StoreDataset::from_blob("not json"),
            Err(DatasetError::Decode(_))
        ));
        assert_eq!(StoreDataset::from_blob("[]"), Err(DatasetError::Empty));
    }
}
