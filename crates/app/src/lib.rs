//! # devicekv-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `KeyValueStore` — single-item get/put against a keyed collection
//!   - `DeviceRepository` — get/put for devices
//! - Provide the **storage adapter** (`KvDeviceRepository`) that maps a
//!   device onto a key-value item and back
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService` — create (validated) and get
//! - Provide **in-process infrastructure** (in-memory key-value store) that
//!   doesn't need IO
//!
//! ## Dependency rule
//! Depends on `devicekv-domain` only (plus `tokio::sync` for locking).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod device_store;
pub mod memory_store;
pub mod ports;
pub mod services;
