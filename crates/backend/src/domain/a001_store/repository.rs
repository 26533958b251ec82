use anyhow::Result;
use contracts::domain::a001_store::StoreDataset;
use sea_orm::DatabaseConnection;

use crate::shared::data::kv_storage;

/// Reads the persisted dataset blob. A blob that fails to decode is an error.
pub async fn load(conn: &DatabaseConnection, key: &str) -> Result<Option<StoreDataset>> {
    match kv_storage::get(conn, key).await? {
        Some(entry) => Ok(Some(StoreDataset::from_blob(&entry.value)?)),
        None => Ok(None),
    }
}

pub async fn save(conn: &DatabaseConnection, key: &str, dataset: &StoreDataset) -> Result<()> {
    let blob = dataset.to_blob()?;
    kv_storage::put(conn, key, &blob).await
}

pub async fn clear(conn: &DatabaseConnection, key: &str) -> Result<()> {
    kv_storage::delete(conn, key).await?;
    Ok(())
}
