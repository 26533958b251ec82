use anyhow::Result;
use contracts::domain::a001_store::StoreDataset;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::repository;

/// Owns the current dataset snapshot for the running service.
///
/// Readers take a cheap `Arc` clone and compute without holding the lock.
/// Writers persist first and swap the snapshot only when that succeeded.
pub struct StoreSession {
    current: RwLock<Arc<StoreDataset>>,
    db: DatabaseConnection,
    dataset_key: String,
}

impl StoreSession {
    /// Restores the persisted dataset, falling back to the built-in one when
    /// nothing is stored or the stored blob cannot be used.
    pub async fn load(db: DatabaseConnection, dataset_key: impl Into<String>) -> Result<Self> {
        let dataset_key = dataset_key.into();

        let dataset = match repository::load(&db, &dataset_key).await {
            Ok(Some(dataset)) => {
                tracing::info!("Restored {} stores from {}", dataset.stores.len(), dataset_key);
                dataset
            }
            Ok(None) => {
                tracing::info!("No saved dataset, using default stores");
                StoreDataset::default_dataset()
            }
            Err(e) => {
                tracing::warn!("Saved dataset unusable, using default stores: {e:#}");
                StoreDataset::default_dataset()
            }
        };

        Ok(Self {
            current: RwLock::new(Arc::new(dataset)),
            db,
            dataset_key,
        })
    }

    pub async fn snapshot(&self) -> Arc<StoreDataset> {
        self.current.read().await.clone()
    }

    /// Validates, persists and installs a complete new dataset.
    pub async fn replace(&self, dataset: StoreDataset) -> Result<Arc<StoreDataset>> {
        dataset.validate()?;

        let mut current = self.current.write().await;
        repository::save(&self.db, &self.dataset_key, &dataset).await?;

        let next = Arc::new(dataset);
        *current = next.clone();
        tracing::info!("Dataset replaced: {} stores ({:?})", next.stores.len(), next.source);
        Ok(next)
    }

    /// Drops the saved blob and goes back to the built-in dataset.
    pub async fn reset(&self) -> Result<Arc<StoreDataset>> {
        let mut current = self.current.write().await;
        repository::clear(&self.db, &self.dataset_key).await?;

        let next = Arc::new(StoreDataset::default_dataset());
        *current = next.clone();
        tracing::info!("Dataset reset to {} default stores", next.stores.len());
        Ok(next)
    }
}
