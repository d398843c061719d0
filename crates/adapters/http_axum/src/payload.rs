//! Permissive decoding of device request bodies.
//!
//! Clients post devices as loosely-typed JSON objects. Decoding never fails:
//! members are matched to fields by name regardless of ASCII case, members
//! that are not strings (including `null`) are skipped, and when a field
//! appears more than once the last member wins. A body that is not a JSON
//! object at all yields [`Device::default`].

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use devicekv_domain::device::{Device, Field};

/// Object members in document order.
struct Members(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for Members {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = Members;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(member) = map.next_entry::<String, Value>()? {
                    members.push(member);
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

/// Decode `body` into a device.
pub fn decode_device(body: &str) -> Device {
    let Members(members) = match serde_json::from_str::<Members>(body) {
        Ok(members) => members,
        Err(err) => {
            tracing::debug!(error = %err, "request body is not a JSON object");
            return Device::default();
        }
    };

    let mut device = Device::default();
    for (name, value) in members {
        let Some(field) = Field::from_wire_name(&name) else {
            continue;
        };
        match value {
            Value::String(text) => *device.field_mut(field) = text,
            Value::Null => {}
            other => tracing::debug!(%field, value = %other, "ignoring non-string member"),
        }
    }
    device
}
