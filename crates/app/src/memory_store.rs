//! In-process key-value store backed by a `HashMap`.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;

use devicekv_domain::error::DeviceKvError;

use crate::ports::{Item, KeyValueStore};

/// Volatile [`KeyValueStore`] keeping every item in memory.
///
/// Items are lost when the process exits. Useful for local runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    items: RwLock<HashMap<(String, String), Item>>,
}

impl InMemoryKeyValueStore {
    /// Number of items across all collections.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// `true` when no item has been written yet.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn put(
        &self,
        collection: &str,
        key: &str,
        item: Item,
    ) -> impl Future<Output = Result<(), DeviceKvError>> + Send {
        let slot = (collection.to_string(), key.to_string());
        async move {
            self.items.write().await.insert(slot, item);
            Ok(())
        }
    }

    fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Item>, DeviceKvError>> + Send {
        let slot = (collection.to_string(), key.to_string());
        async move { Ok(self.items.read().await.get(&slot).cloned()) }
    }
}
