//! Single-table key/value store for JSON blobs.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

pub async fn get(conn: &DatabaseConnection, key: &str) -> Result<Option<KvEntry>> {
    let query = r#"
        SELECT key, value, updated_at
        FROM app_kv
        WHERE key = ?
    "#;

    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            query,
            vec![key.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(KvEntry {
            key: row.try_get("", "key")?,
            value: row.try_get("", "value")?,
            updated_at: row.try_get("", "updated_at")?,
        })),
        None => Ok(None),
    }
}

/// Inserts or overwrites the whole value.
pub async fn put(conn: &DatabaseConnection, key: &str, value: &str) -> Result<()> {
    let query = r#"
        INSERT INTO app_kv (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
    "#;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        query,
        vec![key.into(), value.into(), Utc::now().to_rfc3339().into()],
    ))
    .await?;

    tracing::debug!("kv put: key={}, {} bytes", key, value.len());
    Ok(())
}

/// Returns whether a row was removed.
pub async fn delete(conn: &DatabaseConnection, key: &str) -> Result<bool> {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM app_kv WHERE key = ?",
            vec![key.into()],
        ))
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::memory_connection;

    #[tokio::test]
    async fn test_put_get_overwrite() {
        let conn = memory_connection().await;
        assert!(get(&conn, "k").await.unwrap().is_none());

        put(&conn, "k", "[1]").await.unwrap();
        assert_eq!(get(&conn, "k").await.unwrap().unwrap().value, "[1]");

        put(&conn, "k", "[2]").await.unwrap();
        let entry = get(&conn, "k").await.unwrap().unwrap();
        assert_eq!(entry.key, "k");
        assert_eq!(entry.value, "[2]");
        assert!(!entry.updated_at.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let conn = memory_connection().await;
        put(&conn, "k", "v").await.unwrap();
        assert!(delete(&conn, "k").await.unwrap());
        assert!(!delete(&conn, "k").await.unwrap());
        assert!(get(&conn, "k").await.unwrap().is_none());
    }
}
