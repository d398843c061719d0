//! Storage ports — the raw key-value boundary and the device repository
//! built on top of it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use devicekv_domain::device::Device;
use devicekv_domain::error::DeviceKvError;

/// A stored item: attribute name to string value.
pub type Item = HashMap<String, String>;

/// An opaque keyed store organised in named collections.
pub trait KeyValueStore {
    /// Write `item` under `key`, replacing whatever was there.
    fn put(
        &self,
        collection: &str,
        key: &str,
        item: Item,
    ) -> impl Future<Output = Result<(), DeviceKvError>> + Send;

    /// Read the item stored under `key`, or `None` when absent.
    fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Item>, DeviceKvError>> + Send;
}

impl<T: KeyValueStore + Send + Sync> KeyValueStore for Arc<T> {
    fn put(
        &self,
        collection: &str,
        key: &str,
        item: Item,
    ) -> impl Future<Output = Result<(), DeviceKvError>> + Send {
        (**self).put(collection, key, item)
    }

    fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Item>, DeviceKvError>> + Send {
        (**self).get(collection, key)
    }
}

/// Get/put capability for [`Device`] records.
pub trait DeviceRepository {
    /// Persist a device, overwriting any record with the same key.
    fn put(&self, device: Device) -> impl Future<Output = Result<(), DeviceKvError>> + Send;

    /// Fetch a device by id.
    ///
    /// A miss is **not** an error: it yields [`Device::default`], whose
    /// [`Device::is_found`] is `false`.
    fn get(&self, id: &str) -> impl Future<Output = Result<Device, DeviceKvError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for Arc<T> {
    fn put(&self, device: Device) -> impl Future<Output = Result<(), DeviceKvError>> + Send {
        (**self).put(device)
    }

    fn get(&self, id: &str) -> impl Future<Output = Result<Device, DeviceKvError>> + Send {
        (**self).get(id)
    }
}
