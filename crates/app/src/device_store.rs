//! Storage adapter — maps [`Device`] values onto key-value items.
//!
//! Every device lives in the [`DEVICES_COLLECTION`] collection as one item
//! whose attributes are named after [`Field::attribute_name`]. Which key a
//! device is written to and read from is decided by the [`KeyScheme`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use devicekv_domain::device::{Device, Field};
use devicekv_domain::error::DeviceKvError;

use crate::ports::{DeviceRepository, Item, KeyValueStore};

/// Collection holding every device item.
pub const DEVICES_COLLECTION: &str = "Devices";

/// Prefix prepended to the device id to form a lookup key.
pub const DEVICE_KEY_PREFIX: &str = "/devices/";

/// Key layout used by [`KvDeviceRepository`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// Writes under the raw id but reads under [`DEVICE_KEY_PREFIX`] + id.
    ///
    /// Kept for compatibility with existing tables: a device written through
    /// this scheme is never found again by a read through this scheme.
    #[default]
    Legacy,
    /// Reads and writes both use [`DEVICE_KEY_PREFIX`] + id.
    Prefixed,
}

impl KeyScheme {
    /// Key a device with `id` is written to.
    #[must_use]
    pub fn put_key(self, id: &str) -> Cow<'_, str> {
        match self {
            Self::Legacy => Cow::Borrowed(id),
            Self::Prefixed => Cow::Owned(prefixed(id)),
        }
    }

    /// Key a device with `id` is read from.
    #[must_use]
    pub fn get_key(self, id: &str) -> Cow<'_, str> {
        Cow::Owned(prefixed(id))
    }

    /// `true` when a device written with `put` can be read back with `get`.
    #[must_use]
    pub fn round_trips(self) -> bool {
        matches!(self, Self::Prefixed)
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Legacy => "legacy",
            Self::Prefixed => "prefixed",
        })
    }
}

impl FromStr for KeyScheme {
    type Err = UnknownKeyScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Self::Legacy),
            "prefixed" => Ok(Self::Prefixed),
            other => Err(UnknownKeyScheme(other.to_string())),
        }
    }
}

/// Error returned when parsing an unknown [`KeyScheme`] name.
#[derive(Debug, thiserror::Error)]
#[error("unknown key scheme {0:?}, expected \"legacy\" or \"prefixed\"")]
pub struct UnknownKeyScheme(pub String);

fn prefixed(id: &str) -> String {
    format!("{DEVICE_KEY_PREFIX}{id}")
}

/// Encode a device as a store item, one string attribute per field.
#[must_use]
pub fn to_item(device: &Device) -> Item {
    Field::ALL
        .into_iter()
        .map(|field| {
            (
                field.attribute_name().to_string(),
                device.field(field).to_string(),
            )
        })
        .collect()
}

/// Decode a store item. Missing attributes stay empty; unknown ones are ignored.
#[must_use]
pub fn from_item(mut item: Item) -> Device {
    let mut device = Device::default();
    for field in Field::ALL {
        if let Some(value) = item.remove(field.attribute_name()) {
            *device.field_mut(field) = value;
        }
    }
    device
}

/// [`DeviceRepository`] backed by any [`KeyValueStore`].
pub struct KvDeviceRepository<S> {
    store: S,
    scheme: KeyScheme,
}

impl<S> KvDeviceRepository<S> {
    /// Create a repository writing to `store` with the given key layout.
    pub fn new(store: S, scheme: KeyScheme) -> Self {
        Self { store, scheme }
    }
}

impl<S: KeyValueStore + Send + Sync> DeviceRepository for KvDeviceRepository<S> {
    async fn put(&self, device: Device) -> Result<(), DeviceKvError> {
        let key = self.scheme.put_key(&device.id);
        tracing::debug!(collection = DEVICES_COLLECTION, key = %key, "putting device item");
        self.store.put(DEVICES_COLLECTION, &key, to_item(&device)).await
    }

    async fn get(&self, id: &str) -> Result<Device, DeviceKvError> {
        let key = self.scheme.get_key(id);
        tracing::debug!(collection = DEVICES_COLLECTION, key = %key, "getting device item");
        let item = self.store.get(DEVICES_COLLECTION, &key).await?;
        Ok(item.map(from_item).unwrap_or_default())
    }
}
