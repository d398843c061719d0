//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DeviceKvError`] via `From`. "Device not found" is deliberately absent:
//! a lookup that finds nothing is a successful result.

use crate::device::Field;

/// Top-level error returned by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum DeviceKvError {
    /// The client supplied a device that breaks a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The key-value backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields are empty, listed in declaration order.
    #[error("Empty Field is not valid,Check the following: {}", join_fields(.0))]
    EmptyFields(Vec<Field>),
}

impl ValidationError {
    /// Fields reported by this error.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::EmptyFields(fields) => fields,
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields.iter().map(|field| format!("{field}, ")).collect()
}
