//! # devicekv-domain
//!
//! Pure domain model for the devicekv service.
//!
//! ## Responsibilities
//! - Define the **Device** record (id, model, name, note, serial) and its
//!   JSON wire shape
//! - Define the **Field** catalogue used for validation messages and
//!   storage attribute names
//! - Contain the creation invariant (every field must be non-empty)
//! - Define the error conventions shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod device;
pub mod error;
