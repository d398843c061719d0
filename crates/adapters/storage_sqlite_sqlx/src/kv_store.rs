//! `SQLite` implementation of [`KeyValueStore`].

use std::future::Future;

use sqlx::SqlitePool;

use devicekv_app::ports::{Item, KeyValueStore};
use devicekv_domain::error::DeviceKvError;

use crate::error::StorageError;

const UPSERT: &str = "INSERT INTO items (collection, item_key, attributes) VALUES (?, ?, ?) \
     ON CONFLICT (collection, item_key) DO UPDATE SET attributes = excluded.attributes";
const SELECT_BY_KEY: &str = "SELECT attributes FROM items WHERE collection = ? AND item_key = ?";

/// `SQLite`-backed key-value store.
///
/// Each item is one row; its attributes are kept as a JSON object.
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn put(
        &self,
        collection: &str,
        key: &str,
        item: Item,
    ) -> impl Future<Output = Result<(), DeviceKvError>> + Send {
        let pool = self.pool.clone();
        let collection = collection.to_string();
        let key = key.to_string();
        async move {
            let attributes = serde_json::to_string(&item).map_err(StorageError::from)?;

            sqlx::query(UPSERT)
                .bind(collection)
                .bind(key)
                .bind(attributes)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Item>, DeviceKvError>> + Send {
        let pool = self.pool.clone();
        let collection = collection.to_string();
        let key = key.to_string();
        async move {
            let row: Option<(String,)> = sqlx::query_as(SELECT_BY_KEY)
                .bind(collection)
                .bind(key)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            let item = row
                .map(|(attributes,)| serde_json::from_str::<Item>(&attributes))
                .transpose()
                .map_err(StorageError::from)?;

            Ok(item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteKeyValueStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteKeyValueStore::new(db.pool().clone())
    }

    fn item(name: &str) -> Item {
        Item::from([
            ("ID".to_string(), "id1".to_string()),
            ("Name".to_string(), name.to_string()),
        ])
    }

    #[tokio::test]
    async fn should_put_and_get_item_when_valid() {
        let store = setup().await;
        store.put("Devices", "id1", item("sensor1")).await.unwrap();

        let fetched = store.get("Devices", "id1").await.unwrap();
        assert_eq!(fetched, Some(item("sensor1")));
    }

    #[tokio::test]
    async fn should_return_none_when_item_not_found() {
        let store = setup().await;
        let fetched = store.get("Devices", "missing").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn should_overwrite_item_when_key_exists() {
        let store = setup().await;
        store.put("Devices", "id1", item("first")).await.unwrap();
        store.put("Devices", "id1", item("second")).await.unwrap();

        let fetched = store.get("Devices", "id1").await.unwrap().unwrap();
        assert_eq!(fetched["Name"], "second");
    }

    #[tokio::test]
    async fn should_keep_collections_apart() {
        let store = setup().await;
        store.put("Devices", "id1", item("sensor1")).await.unwrap();

        assert!(store.get("Gateways", "id1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_treat_key_prefix_as_part_of_key() {
        let store = setup().await;
        store.put("Devices", "id1", item("sensor1")).await.unwrap();

        assert!(store.get("Devices", "/devices/id1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_report_storage_error_when_row_is_corrupt() {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        sqlx::query("INSERT INTO items (collection, item_key, attributes) VALUES (?, ?, ?)")
            .bind("Devices")
            .bind("id1")
            .bind("not json")
            .execute(db.pool())
            .await
            .unwrap();
        let store = SqliteKeyValueStore::new(db.pool().clone());

        let result = store.get("Devices", "id1").await;
        assert!(matches!(result, Err(DeviceKvError::Storage(_))));
    }
}
