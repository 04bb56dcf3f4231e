//! # Update Validator
//!
//! Decides whether a proposed change to an existing QR code is allowed.
//!
//! ## Rules (first failure wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. update.qr_type present and != existing tag                          │
//! │       ──► TYPE_CHANGE_NOT_ALLOWED   (raw tag compare, not kind)         │
//! │  2. existing is Individual-like and recipients present                  │
//! │       ──► INVALID_OPERATION                                             │
//! │  3. existing is Team-like and fewer than 2 recipients                   │
//! │       ──► MIN_RECIPIENTS_REQUIRED                                       │
//! │  4. otherwise ──► Ok(())                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Duplicate ids, whether each staff member exists and whether they belong
//! to the venue are checked by the caller against its store.

use serde::{Deserialize, Deserializer};
use tracing::debug;
use ts_rs::TS;

use crate::classifier::{classify, QrKind};
use crate::error::UpdateRejection;
use crate::types::{QrCode, QrStatus, QrType};
use crate::MIN_TEAM_RECIPIENTS;

/// Result type for update validation.
pub type UpdateResult = Result<(), UpdateRejection>;

/// A partial update to a QR code. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QrUpdate {
    #[serde(default, rename = "type")]
    pub qr_type: Option<QrType>,

    /// Replacement recipient list. `Some(vec![])` is an explicit attempt to
    /// clear it, which is not the same as leaving it out. A JSON `null` is
    /// present too and reads as an empty list.
    #[serde(default, deserialize_with = "present_list")]
    pub recipient_staff_ids: Option<Vec<String>>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub status: Option<QrStatus>,
}

/// Only called when the field is in the payload, so `null` stays distinct
/// from a missing key.
fn present_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(Some(ids.unwrap_or_default()))
}

/// Validates `update` against the stored record.
pub fn validate_qr_update(existing: &QrCode, update: &QrUpdate) -> UpdateResult {
    if let Some(proposed) = update.qr_type {
        if proposed != existing.qr_type {
            return reject(
                existing,
                UpdateRejection::TypeChangeNotAllowed {
                    from: existing.qr_type,
                    to: proposed,
                },
            );
        }
    }

    if let Some(ids) = &update.recipient_staff_ids {
        match classify(existing.qr_type) {
            QrKind::Individual => {
                return reject(
                    existing,
                    UpdateRejection::InvalidOperation {
                        qr_type: existing.qr_type,
                    },
                );
            }
            QrKind::Team if ids.len() < MIN_TEAM_RECIPIENTS => {
                return reject(
                    existing,
                    UpdateRejection::MinRecipientsRequired {
                        min: MIN_TEAM_RECIPIENTS,
                        given: ids.len(),
                    },
                );
            }
            QrKind::Team => {}
        }
    }

    Ok(())
}

fn reject(existing: &QrCode, rejection: UpdateRejection) -> UpdateResult {
    debug!(qr_id = %existing.id, code = rejection.code(), "QR update rejected");
    Err(rejection)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn qr(qr_type: QrType) -> QrCode {
        QrCode {
            id: "qr-1".to_string(),
            short_code: "abc123".to_string(),
            qr_type,
            status: QrStatus::Active,
            label: None,
            venue_id: "venue-1".to_string(),
        }
    }

    fn ids(n: usize) -> Option<Vec<String>> {
        Some((0..n).map(|i| format!("staff-{}", i)).collect())
    }

    fn with_recipients(n: usize) -> QrUpdate {
        QrUpdate {
            recipient_staff_ids: ids(n),
            ..Default::default()
        }
    }

    fn any_qr_type() -> impl Strategy<Value = QrType> {
        prop::sample::select(QrType::ALL.to_vec())
    }

    #[test]
    fn test_empty_update_is_valid() {
        for qr_type in QrType::ALL {
            assert_eq!(validate_qr_update(&qr(qr_type), &QrUpdate::default()), Ok(()));
        }
    }

    #[test]
    fn test_same_type_is_not_a_change() {
        let update = QrUpdate {
            qr_type: Some(QrType::Table),
            ..Default::default()
        };
        assert_eq!(validate_qr_update(&qr(QrType::Table), &update), Ok(()));
    }

    #[test]
    fn test_alias_change_is_still_a_change() {
        let update = QrUpdate {
            qr_type: Some(QrType::Venue),
            ..Default::default()
        };
        let err = validate_qr_update(&qr(QrType::Table), &update).unwrap_err();
        assert_eq!(err.code(), "TYPE_CHANGE_NOT_ALLOWED");
    }

    #[test]
    fn test_min_recipients_boundary() {
        let team = qr(QrType::Team);
        for n in [0, 1] {
            assert_eq!(
                validate_qr_update(&team, &with_recipients(n)),
                Err(UpdateRejection::MinRecipientsRequired { min: 2, given: n })
            );
        }
        assert_eq!(validate_qr_update(&team, &with_recipients(2)), Ok(()));
        assert_eq!(validate_qr_update(&team, &with_recipients(3)), Ok(()));
    }

    #[test]
    fn test_individual_rejects_recipient_edit() {
        for qr_type in [QrType::Individual, QrType::Personal] {
            for n in [0, 1, 2, 5] {
                assert_eq!(
                    validate_qr_update(&qr(qr_type), &with_recipients(n)),
                    Err(UpdateRejection::InvalidOperation { qr_type })
                );
            }
        }
    }

    #[test]
    fn test_label_and_status_are_free() {
        let update = QrUpdate {
            label: Some("Terrace".to_string()),
            status: Some(QrStatus::Inactive),
            ..Default::default()
        };
        assert_eq!(validate_qr_update(&qr(QrType::Personal), &update), Ok(()));
    }

    #[test]
    fn test_update_from_json() {
        let update: QrUpdate =
            serde_json::from_str(r#"{"type":"TEAM","recipientStaffIds":["a","b"]}"#).unwrap();
        assert_eq!(update.qr_type, Some(QrType::Team));
        assert_eq!(update.recipient_staff_ids.as_ref().map(Vec::len), Some(2));

        let update: QrUpdate = serde_json::from_str(r#"{"recipientStaffIds":[]}"#).unwrap();
        assert_eq!(update.recipient_staff_ids, Some(Vec::new()));

        let update: QrUpdate = serde_json::from_str(r#"{"label":"Bar"}"#).unwrap();
        assert_eq!(update.recipient_staff_ids, None);
    }

    #[test]
    fn test_null_recipients_count_as_present() {
        let update: QrUpdate = serde_json::from_str(r#"{"recipientStaffIds":null}"#).unwrap();
        assert_eq!(update.recipient_staff_ids, Some(Vec::new()));

        for qr_type in [QrType::Individual, QrType::Personal] {
            assert_eq!(
                validate_qr_update(&qr(qr_type), &update),
                Err(UpdateRejection::InvalidOperation { qr_type })
            );
        }
        for qr_type in [QrType::Team, QrType::Table, QrType::Venue] {
            assert_eq!(
                validate_qr_update(&qr(qr_type), &update),
                Err(UpdateRejection::MinRecipientsRequired { min: 2, given: 0 })
            );
        }
    }

    proptest! {
        #[test]
        fn prop_type_change_always_rejected(
            existing in any_qr_type(),
            proposed in any_qr_type(),
            recipients in proptest::option::of(0usize..6),
        ) {
            prop_assume!(existing != proposed);
            let update = QrUpdate {
                qr_type: Some(proposed),
                recipient_staff_ids: recipients.and_then(ids),
                ..Default::default()
            };
            let err = validate_qr_update(&qr(existing), &update).unwrap_err();
            prop_assert_eq!(err.code(), "TYPE_CHANGE_NOT_ALLOWED");
        }

        #[test]
        fn prop_team_aliases_share_rules(n in 0usize..6) {
            let expected = validate_qr_update(&qr(QrType::Team), &with_recipients(n));
            prop_assert_eq!(validate_qr_update(&qr(QrType::Table), &with_recipients(n)), expected.clone());
            prop_assert_eq!(validate_qr_update(&qr(QrType::Venue), &with_recipients(n)), expected);
        }
    }
}
