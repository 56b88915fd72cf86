//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging an
//! [`ObjectTypeId`] (which names a whole custom-object schema) with a
//! [`RecordId`] (which names one record of that schema) even though both are
//! strings under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or consists only of whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: CRM-assigned
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a custom-object type in the CRM.
    ///
    /// Either the fully qualified object type id (`"2-12345678"`) or the
    /// portal-scoped name (`"p_music_events"`). It becomes the last path
    /// segment of every objects API call.
    ObjectTypeId
}

string_id! {
    /// Identifies one record of a custom object.
    ///
    /// Assigned by the CRM on creation; this system never invents one.
    RecordId
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single inbound HTTP request.
///
/// Generated fresh for every request; recorded on the request span so the
/// outbound CRM call and any logged upstream error body can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a [`RequestId`] from an existing UUID (e.g. parsed from a header).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_type_id_rejects_blank() {
        assert!(ObjectTypeId::new("").is_none());
        assert!(ObjectTypeId::new("   ").is_none());
    }

    #[test]
    fn test_object_type_id_keeps_value_verbatim() {
        let id = ObjectTypeId::new("2-12345678").unwrap();
        assert_eq!(id.as_str(), "2-12345678");
        assert_eq!(id.to_string(), "2-12345678");
    }

    #[test]
    fn test_record_id_serialises_as_plain_string() {
        let id = RecordId::new("512").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"512\"");

        let back: RecordId = serde_json::from_str("\"512\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new_random(), RequestId::new_random());
    }
}
