//! Record value types.
//!
//! A [`Record`] is what the CRM hands back; [`RecordFields`] is what a caller
//! hands to the CRM to create one. Neither type validates its contents: the
//! CRM owns the schema and is the only party that accepts or rejects values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::RecordId;

/// The record properties this system reads and writes, in display order.
///
/// Sent as the `properties` query parameter when listing so the CRM returns
/// exactly these four (plus the CRM's own bookkeeping properties).
pub const PROPERTY_NAMES: [&str; 4] = ["name", "venue", "date", "genre"];

// ---------------------------------------------------------------------------
// Records as returned by the CRM
// ---------------------------------------------------------------------------

/// One custom-object record as returned by the CRM.
///
/// Fields mirror the CRM's object envelope. Only `properties` is required on
/// the wire; everything else is tolerated when absent so that a sparse or
/// sandboxed portal still renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// CRM-assigned record identifier.
    #[serde(default)]
    pub id: Option<RecordId>,

    /// Property bag, kept verbatim.
    pub properties: RecordProperties,

    /// When the CRM created the record. `None` if absent or unreadable.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,

    /// When the CRM last modified the record. `None` if absent or unreadable.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,

    /// Whether the record is archived. Listing normally returns only live records.
    #[serde(default)]
    pub archived: bool,
}

// A bad timestamp on one record must not fail the whole listing.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// The property bag of a [`Record`].
///
/// The four named properties are surfaced as fields; the CRM returns `null`
/// for any that were never set, hence `Option`. Every other property (for
/// example `hs_object_id`, `hs_createdate`) is kept in [`Self::other`]
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordProperties {
    /// Event name.
    #[serde(default)]
    pub name: Option<String>,
    /// Where the event takes place.
    #[serde(default)]
    pub venue: Option<String>,
    /// Event date. Free text; the CRM decides what it accepts.
    #[serde(default)]
    pub date: Option<String>,
    /// Music genre.
    #[serde(default)]
    pub genre: Option<String>,
    /// Any further properties returned by the CRM.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Records as submitted to the CRM
// ---------------------------------------------------------------------------

/// The fields of a record to be created.
///
/// Deserialised straight from the submission form and serialised straight
/// into the CRM request's `properties` object. A field missing from the form
/// is `None` and is omitted from the CRM request; a field submitted empty is
/// `Some("")` and is forwarded as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Event name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Venue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Date, unvalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Genre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl RecordFields {
    /// Creates a field set with all four values present.
    pub fn new(
        name: impl Into<String>,
        venue: impl Into<String>,
        date: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            venue: Some(venue.into()),
            date: Some(date.into()),
            genre: Some(genre.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_decodes_crm_envelope() {
        let raw = json!({
            "id": "512",
            "properties": {
                "name": "Jazz Night",
                "venue": "Blue Room",
                "date": "2024-05-01",
                "genre": "Jazz",
                "hs_object_id": "512"
            },
            "createdAt": "2024-04-01T10:00:00.000Z",
            "updatedAt": "2024-04-02T10:00:00.000Z",
            "archived": false
        });

        let record: Record = serde_json::from_value(raw).unwrap();

        assert_eq!(record.id, RecordId::new("512"));
        assert_eq!(record.properties.name.as_deref(), Some("Jazz Night"));
        assert_eq!(record.properties.genre.as_deref(), Some("Jazz"));
        assert_eq!(record.properties.other.get("hs_object_id"), Some(&json!("512")));
        assert!(record.created_at.is_some());
        assert!(!record.archived);
    }

    #[test]
    fn test_record_tolerates_null_and_missing_properties() {
        let raw = json!({ "properties": { "name": null, "venue": "Hall" } });

        let record: Record = serde_json::from_value(raw).unwrap();

        assert_eq!(record.id, None);
        assert_eq!(record.properties.name, None);
        assert_eq!(record.properties.venue.as_deref(), Some("Hall"));
        assert_eq!(record.properties.date, None);
    }

    #[test]
    fn test_record_with_unreadable_timestamps_still_decodes() {
        let raw = json!({
            "id": "7",
            "properties": { "name": "Late Show" },
            "createdAt": "last tuesday",
            "updatedAt": 1714557600000u64
        });

        let record: Record = serde_json::from_value(raw).unwrap();

        assert_eq!(record.id, RecordId::new("7"));
        assert_eq!(record.properties.name.as_deref(), Some("Late Show"));
        assert_eq!(record.created_at, None);
        assert_eq!(record.updated_at, None);
    }

    #[test]
    fn test_record_fields_omit_absent_values() {
        let fields = RecordFields {
            name: Some(String::new()),
            venue: Some("Hall".to_string()),
            date: None,
            genre: None,
        };

        let value = serde_json::to_value(&fields).unwrap();

        assert_eq!(value, json!({ "name": "", "venue": "Hall" }));
    }

    #[test]
    fn test_property_names_order() {
        assert_eq!(PROPERTY_NAMES.join(","), "name,venue,date,genre");
    }
}
