//! Shared application state for axum handlers.

use std::sync::Arc;

use devicekv_app::ports::DeviceRepository;

use crate::handler::DeviceHandler;

/// Application state shared across all axum handlers.
///
/// Generic over the device repository to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Device request handler.
    pub handler: Arc<DeviceHandler<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<R> AppState<R>
where
    R: DeviceRepository + Send + Sync + 'static,
{
    /// Create a new application state from a handler instance.
    pub fn new(handler: DeviceHandler<R>) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}
