//! Device service — use-cases for creating and fetching devices.

use devicekv_domain::device::Device;
use devicekv_domain::error::DeviceKvError;

use crate::ports::DeviceRepository;

/// Application service for device get/put operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Store a device after validating domain invariants.
    ///
    /// An existing device with the same id is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceKvError::Validation`] if any field is empty, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id))]
    pub async fn create_device(&self, device: Device) -> Result<(), DeviceKvError> {
        device.validate()?;
        self.repo.put(device).await
    }

    /// Look up a device by id.
    ///
    /// A miss yields the zero-valued [`Device`]; check [`Device::is_found`].
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: &str) -> Result<Device, DeviceKvError> {
        self.repo.get(id).await
    }
}
