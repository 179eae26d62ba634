//! Domain models for the Roster backend.
//!
//! - [`RawRecord`] - Person record as found in the source dataset
//! - [`NormalizedRecord`] - Display-ready record produced by the transform
//! - [`CalendarDate`] - Lenient calendar date used for birth dates
//! - [`Post`], [`User`] - Posts API resources

pub mod date;
pub mod post;

use serde::{Deserialize, Serialize};

pub use date::CalendarDate;
pub use post::{Address, Company, Geo, Post, PostWithAuthor, User};

// =============================================================================
// Raw Record
// =============================================================================

/// One person entry as sourced from the dataset.
///
/// Keys are kept in their source spelling (`first_name`, `birth_date`, ...)
/// so datasets deserialize without any mapping step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Given name, never empty in well-formed data.
    pub first_name: String,
    /// Surname. `None` means no surname was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Opaque identifier, passed through unchanged.
    pub username: String,
    /// Base-10 integer encoded as text.
    pub power: String,
    /// Carried through the dataset, not used by the transform.
    pub gender: String,
    /// `DD.MM.YYYY`.
    pub birth_date: String,
}

impl RawRecord {
    /// Create a record without a surname.
    pub fn new(
        first_name: impl Into<String>,
        username: impl Into<String>,
        power: impl Into<String>,
        gender: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: None,
            username: username.into(),
            power: power.into(),
            gender: gender.into(),
            birth_date: birth_date.into(),
        }
    }

    /// Set the surname.
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }
}

// =============================================================================
// Normalized Record
// =============================================================================

/// Display-ready form of a [`RawRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    /// First name, followed by a single space and the surname when one exists.
    pub full_name: String,
    /// Copied verbatim from the input.
    pub username: String,
    /// Parsed power. `None` when the text held no base-10 integer.
    pub power: Option<i64>,
    /// Birth date built from the dotted day/month/year fields.
    pub birth_date: CalendarDate,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_deserialize_without_last_name() {
        let record: RawRecord = serde_json::from_value(json!({
            "first_name": "Kenneth",
            "username": "kbeavers2",
            "power": "463",
            "gender": "Male",
            "birth_date": "18.10.1990"
        }))
        .unwrap();

        assert_eq!(record.first_name, "Kenneth");
        assert!(record.last_name.is_none());
        assert_eq!(record.power, "463");
    }

    #[test]
    fn test_empty_last_name_stays_distinct() {
        let record: RawRecord = serde_json::from_value(json!({
            "first_name": "Kenneth",
            "last_name": "",
            "username": "kbeavers2",
            "power": "463",
            "gender": "Male",
            "birth_date": "18.10.1990"
        }))
        .unwrap();

        assert_eq!(record.last_name.as_deref(), Some(""));
    }

    #[test]
    fn test_raw_record_skips_absent_last_name() {
        let record = RawRecord::new("Iris", "ibolens9", "418", "Female", "13.04.1993");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("last_name").is_none());

        let json = serde_json::to_value(record.with_last_name("Bolens")).unwrap();
        assert_eq!(json["last_name"], "Bolens");
    }

    #[test]
    fn test_normalized_record_serialization() {
        let record = NormalizedRecord {
            full_name: "Stepha Quiddinton".into(),
            username: "squiddinton0".into(),
            power: Some(481),
            birth_date: CalendarDate::from_parts(Some(1996), Some(9), Some(7)),
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["fullName"], "Stepha Quiddinton");
        assert_eq!(json["username"], "squiddinton0");
        assert_eq!(json["power"], 481);
        assert_eq!(json["birthDate"], "1996-10-07");
    }

    #[test]
    fn test_missing_power_serializes_as_null() {
        let record = NormalizedRecord {
            full_name: "Ham".into(),
            username: "hruslinge6".into(),
            power: None,
            birth_date: CalendarDate::Invalid,
        };
        let json = serde_json::to_value(&record).unwrap();

        assert!(json["power"].is_null());
        assert!(json["birthDate"].is_null());
    }
}
