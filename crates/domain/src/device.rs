//! Device — the single record type managed by devicekv.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceKvError, ValidationError};

/// One of the five string fields carried by a [`Device`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Model,
    Name,
    Note,
    Serial,
}

impl Field {
    /// Every field, in the order used for validation reports and storage.
    pub const ALL: [Self; 5] = [Self::Id, Self::Model, Self::Name, Self::Note, Self::Serial];

    /// Name shown to clients in validation messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Model => "Model",
            Self::Name => "Name",
            Self::Note => "Note",
            Self::Serial => "Serial",
        }
    }

    /// Attribute name used in a key-value store item.
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Model => "DeviceModel",
            Self::Name => "Name",
            Self::Note => "Note",
            Self::Serial => "Serial",
        }
    }

    /// Member name in the JSON representation of a [`Device`].
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Model => "deviceModel",
            Self::Name => "name",
            Self::Note => "note",
            Self::Serial => "serial",
        }
    }

    /// Look a field up by JSON member name, ignoring ASCII case.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A device record.
///
/// The zero value ([`Device::default`]) doubles as the "not found" result of
/// a storage lookup; use [`Device::is_found`] to tell the two apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub id: String,
    #[serde(rename = "deviceModel")]
    pub model: String,
    pub name: String,
    pub note: String,
    pub serial: String,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Borrow the value of `field`.
    #[must_use]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Model => &self.model,
            Field::Name => &self.name,
            Field::Note => &self.note,
            Field::Serial => &self.serial,
        }
    }

    /// Mutably borrow the value of `field`.
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Id => &mut self.id,
            Field::Model => &mut self.model,
            Field::Name => &mut self.name,
            Field::Note => &mut self.note,
            Field::Serial => &mut self.serial,
        }
    }

    /// `false` for the zero-valued sentinel returned when a lookup misses.
    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.id.is_empty()
    }

    /// Empty fields, in [`Field::ALL`] order.
    #[must_use]
    pub fn empty_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.field(*field).is_empty())
            .collect()
    }

    /// Check the creation invariant: every field must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceKvError::Validation`] listing every empty field.
    pub fn validate(&self) -> Result<(), DeviceKvError> {
        let empty = self.empty_fields();
        if empty.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::EmptyFields(empty).into())
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<String>,
    model: Option<String>,
    name: Option<String>,
    note: Option<String>,
    serial: Option<String>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`DeviceKvError::Validation`] if any field is missing or empty.
    pub fn build(self) -> Result<Device, DeviceKvError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            note: self.note.unwrap_or_default(),
            serial: self.serial.unwrap_or_default(),
        };
        device.validate()?;
        Ok(device)
    }
}
