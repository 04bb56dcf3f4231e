//! # Domain Types
//!
//! The read-side snapshot the engine decides on.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         QrSnapshot                                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     QrCode      │   │      Venue      │   │      Staff      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  short_code     │   │  name           │   │  display_name   │       │
//! │  │  qr_type        │   │  status         │   │  status         │       │
//! │  │  status         │   │  payment_       │   │  role           │       │
//! │  │  label          │   │    configured   │   │  avatar_url     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  staff:      Option<Staff>     (individual-like codes)                  │
//! │  recipients: Vec<Recipient>    (team-like codes, insertion order)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is persisted by this crate. Callers load a snapshot, hand it
//! in, and own whatever happens to the result.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// QR Type
// =============================================================================

/// The stored type tag of a QR code.
///
/// Five spellings exist because physical codes already printed with the
/// legacy tags must keep working. Only [`crate::classifier`] looks at the
/// spelling; everything downstream branches on [`crate::classifier::QrKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrType {
    Individual,
    Team,
    /// Legacy alias of `Individual`.
    Personal,
    /// Legacy alias of `Team`.
    Table,
    /// Legacy alias of `Team`.
    Venue,
}

impl QrType {
    /// All five tags, in declaration order.
    pub const ALL: [QrType; 5] = [
        QrType::Individual,
        QrType::Team,
        QrType::Personal,
        QrType::Table,
        QrType::Venue,
    ];

    /// Returns the wire spelling of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            QrType::Individual => "INDIVIDUAL",
            QrType::Team => "TEAM",
            QrType::Personal => "PERSONAL",
            QrType::Table => "TABLE",
            QrType::Venue => "VENUE",
        }
    }
}

impl fmt::Display for QrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INDIVIDUAL" => Ok(QrType::Individual),
            "TEAM" => Ok(QrType::Team),
            "PERSONAL" => Ok(QrType::Personal),
            "TABLE" => Ok(QrType::Table),
            "VENUE" => Ok(QrType::Venue),
            _ => Err(CoreError::UnknownQrType(s.to_string())),
        }
    }
}

/// Deserialization goes through `FromStr` so an unknown stored tag fails at
/// load time and never reaches the engine.
impl<'de> Deserialize<'de> for QrType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Statuses
// =============================================================================

/// Whether a QR code is currently in service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrStatus {
    #[default]
    Active,
    Inactive,
}

/// Lifecycle state of a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VenueStatus {
    /// Venue is live and accepting tips.
    Active,
    /// Venue is still being set up.
    #[default]
    Draft,
    /// Venue was suspended by an operator.
    Blocked,
}

/// Employment state of a staff member at their venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffStatus {
    #[default]
    Active,
    Inactive,
}

// =============================================================================
// Entities
// =============================================================================

/// A printed QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: String,

    /// Short code encoded in the printed URL.
    pub short_code: String,

    /// Immutable after creation.
    #[serde(rename = "type")]
    pub qr_type: QrType,

    pub status: QrStatus,

    /// Optional display text (e.g. "Bar", "Table 12").
    #[serde(default)]
    pub label: Option<String>,

    pub venue_id: String,
}

/// The venue a QR code belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub status: VenueStatus,

    /// True once the payment-provider account is linked.
    #[serde(default)]
    pub payment_configured: bool,
}

/// A staff member owned by a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub display_name: String,
    pub status: StaffStatus,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Staff {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == StaffStatus::Active
    }
}

/// Link between a team-like QR code and one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recipient {
    pub staff: Staff,
}

impl From<Staff> for Recipient {
    fn from(staff: Staff) -> Self {
        Recipient { staff }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the engine needs to decide on one QR code, read at one instant.
///
/// `staff` is only meaningful for individual-like codes and `recipients`
/// only for team-like ones; the resolver ignores the other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSnapshot {
    pub qr: QrCode,
    pub venue: Venue,
    #[serde(default)]
    pub staff: Option<Staff>,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_type_parse_is_case_insensitive() {
        assert_eq!("team".parse::<QrType>().unwrap(), QrType::Team);
        assert_eq!(" Personal ".parse::<QrType>().unwrap(), QrType::Personal);
        assert_eq!("VENUE".parse::<QrType>().unwrap(), QrType::Venue);
    }

    #[test]
    fn test_qr_type_parse_rejects_unknown_tag() {
        let err = "POOL".parse::<QrType>().unwrap_err();
        assert_eq!(err, CoreError::UnknownQrType("POOL".to_string()));
    }

    #[test]
    fn test_qr_type_display_matches_wire() {
        for qr_type in QrType::ALL {
            let json = serde_json::to_string(&qr_type).unwrap();
            assert_eq!(json, format!("\"{}\"", qr_type));
        }
    }

    #[test]
    fn test_unknown_tag_fails_deserialization() {
        let raw = r#"{"id":"q1","shortCode":"abc","type":"POOL","status":"ACTIVE","venueId":"v1"}"#;
        assert!(serde_json::from_str::<QrCode>(raw).is_err());
    }

    #[test]
    fn test_qr_code_from_json() {
        let raw = r#"{"id":"q1","shortCode":"abc","type":"table","status":"ACTIVE","venueId":"v1"}"#;
        let qr: QrCode = serde_json::from_str(raw).unwrap();
        assert_eq!(qr.qr_type, QrType::Table);
        assert_eq!(qr.label, None);
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(QrStatus::default(), QrStatus::Active);
        assert_eq!(VenueStatus::default(), VenueStatus::Draft);
        assert_eq!(StaffStatus::default(), StaffStatus::Active);
    }
}
