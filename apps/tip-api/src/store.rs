//! # In-Memory Snapshot Store
//!
//! Holds venues, staff and QR codes for the service and hands the engine
//! consistent snapshots.
//!
//! ## Locking
//! ```text
//! snapshot_by_short_code ── read lock ──► QR + venue + staff + recipients
//!                                          (all read under one guard)
//!
//! update_qr ─────────────── write lock ─► validate ──► check staff ──► apply
//! ```
//!
//! The engine assumes its snapshot was read at one instant. Taking every
//! piece under the same guard is what makes that true here.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{info, warn};

use tipqr_core::update::validate_qr_update;
use tipqr_core::validation::validate_label;
use tipqr_core::{QrCode, QrSnapshot, QrUpdate, Recipient, Staff, UpdateRejection, ValidationError, Venue};

// =============================================================================
// Records
// =============================================================================

/// A stored QR code with its staff links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRecord {
    #[serde(flatten)]
    pub code: QrCode,

    /// Bound staff member of an individual-like code.
    #[serde(default)]
    pub staff_id: Option<String>,

    /// Recipient links of a team-like code, in configured order.
    #[serde(default)]
    pub recipient_staff_ids: Vec<String>,
}

/// A staff member with the venue that owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub venue_id: String,
    #[serde(flatten)]
    pub staff: Staff,
}

/// Startup data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSeed {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub staff: Vec<StaffRecord>,
    #[serde(default)]
    pub qr_codes: Vec<QrRecord>,
}

// =============================================================================
// Store Error
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Seed data references something that does not exist.
    #[error("{entity} {id} references missing {missing}")]
    DanglingReference {
        entity: &'static str,
        id: String,
        missing: String,
    },

    /// Seed data links a QR code to staff of another venue.
    #[error("QR code {qr_id} links staff {staff_id} from another venue")]
    ForeignStaff { qr_id: String, staff_id: String },

    #[error("Short code {0} is used more than once")]
    DuplicateShortCode(String),

    #[error("QR code not found: {0}")]
    QrNotFound(String),

    #[error("Staff member {0} does not belong to this venue")]
    UnknownStaff(String),

    #[error("Staff member {0} is listed more than once")]
    DuplicateStaff(String),

    #[error(transparent)]
    Rejected(#[from] UpdateRejection),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Default)]
struct StoreData {
    venues: HashMap<String, Venue>,
    staff: HashMap<String, StaffRecord>,
    qr_codes: HashMap<String, QrRecord>,
    /// short code → QR id
    short_codes: HashMap<String, String>,
}

/// Venues, staff and QR codes behind one lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreData>,
}

impl InMemoryStore {
    /// Load and check a seed file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        let seed: StoreSeed = serde_json::from_str(&raw)?;
        let store = Self::from_seed(seed)?;
        info!(path = %path.display(), "Seed data loaded");
        Ok(store)
    }

    /// Build a store, rejecting seeds with dangling references.
    pub fn from_seed(seed: StoreSeed) -> Result<Self, StoreError> {
        let mut data = StoreData::default();

        for venue in seed.venues {
            data.venues.insert(venue.id.clone(), venue);
        }

        for record in seed.staff {
            if !data.venues.contains_key(&record.venue_id) {
                return Err(StoreError::DanglingReference {
                    entity: "Staff",
                    id: record.staff.id,
                    missing: format!("venue {}", record.venue_id),
                });
            }
            data.staff.insert(record.staff.id.clone(), record);
        }

        for record in seed.qr_codes {
            let code = &record.code;
            if !data.venues.contains_key(&code.venue_id) {
                return Err(StoreError::DanglingReference {
                    entity: "QR code",
                    id: code.id.clone(),
                    missing: format!("venue {}", code.venue_id),
                });
            }

            let linked = record.staff_id.iter().chain(record.recipient_staff_ids.iter());
            for staff_id in linked {
                match data.staff.get(staff_id) {
                    Some(staff) if staff.venue_id == code.venue_id => {}
                    Some(_) => {
                        return Err(StoreError::ForeignStaff {
                            qr_id: code.id.clone(),
                            staff_id: staff_id.clone(),
                        });
                    }
                    None => {
                        return Err(StoreError::DanglingReference {
                            entity: "QR code",
                            id: code.id.clone(),
                            missing: format!("staff {}", staff_id),
                        });
                    }
                }
            }

            if data
                .short_codes
                .insert(code.short_code.clone(), code.id.clone())
                .is_some()
            {
                return Err(StoreError::DuplicateShortCode(code.short_code.clone()));
            }
            let id = code.id.clone();
            data.qr_codes.insert(id, record);
        }

        info!(
            venues = data.venues.len(),
            staff = data.staff.len(),
            qr_codes = data.qr_codes.len(),
            "Store initialized"
        );

        Ok(InMemoryStore {
            data: RwLock::new(data),
        })
    }

    /// Reads the snapshot for a scanned short code.
    pub async fn snapshot_by_short_code(&self, short_code: &str) -> Option<QrSnapshot> {
        let data = self.data.read().await;

        let qr_id = data.short_codes.get(short_code)?;
        let record = data.qr_codes.get(qr_id)?;
        let venue = data.venues.get(&record.code.venue_id)?.clone();

        let staff = record
            .staff_id
            .as_ref()
            .and_then(|id| data.staff.get(id))
            .map(|r| r.staff.clone());

        let recipients = record
            .recipient_staff_ids
            .iter()
            .filter_map(|id| data.staff.get(id))
            .map(|r| Recipient::from(r.staff.clone()))
            .collect();

        Some(QrSnapshot {
            qr: record.code.clone(),
            venue,
            staff,
            recipients,
        })
    }

    /// Validates and applies an update, returning the new record.
    ///
    /// Engine rules run first; then the staff ids are checked against this
    /// venue. Nothing is written unless every check passes.
    pub async fn update_qr(&self, qr_id: &str, update: QrUpdate) -> Result<QrRecord, StoreError> {
        let mut data = self.data.write().await;

        let existing = data
            .qr_codes
            .get(qr_id)
            .ok_or_else(|| StoreError::QrNotFound(qr_id.to_string()))?;

        if let Err(rejection) = validate_qr_update(&existing.code, &update) {
            warn!(qr_id, code = rejection.code(), "Rejected QR update");
            return Err(rejection.into());
        }

        let venue_id = existing.code.venue_id.clone();
        let label = match &update.label {
            Some(label) => Some(validate_label(Some(label.as_str()))?),
            None => None,
        };

        if let Some(ids) = &update.recipient_staff_ids {
            let mut seen = HashSet::new();
            for id in ids {
                if !seen.insert(id.as_str()) {
                    return Err(StoreError::DuplicateStaff(id.clone()));
                }
                match data.staff.get(id) {
                    Some(record) if record.venue_id == venue_id => {}
                    _ => return Err(StoreError::UnknownStaff(id.clone())),
                }
            }
        }

        let record = data
            .qr_codes
            .get_mut(qr_id)
            .ok_or_else(|| StoreError::QrNotFound(qr_id.to_string()))?;

        if let Some(ids) = update.recipient_staff_ids {
            record.recipient_staff_ids = ids;
        }
        if let Some(label) = label {
            record.code.label = label;
        }
        if let Some(status) = update.status {
            record.code.status = status;
        }

        info!(qr_id, "QR code updated");
        Ok(record.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tipqr_core::{QrStatus, QrType, StaffStatus, VenueStatus};

    pub(crate) fn venue(id: &str) -> Venue {
        Venue {
            id: id.to_string(),
            name: format!("Venue {}", id),
            logo_url: None,
            status: VenueStatus::Active,
            payment_configured: true,
        }
    }

    pub(crate) fn staff(id: &str, venue_id: &str, name: &str, status: StaffStatus) -> StaffRecord {
        StaffRecord {
            venue_id: venue_id.to_string(),
            staff: Staff {
                id: id.to_string(),
                display_name: name.to_string(),
                status,
                role: None,
                avatar_url: None,
            },
        }
    }

    pub(crate) fn qr(id: &str, short_code: &str, qr_type: QrType) -> QrRecord {
        QrRecord {
            code: QrCode {
                id: id.to_string(),
                short_code: short_code.to_string(),
                qr_type,
                status: QrStatus::Active,
                label: None,
                venue_id: "v1".to_string(),
            },
            staff_id: None,
            recipient_staff_ids: Vec::new(),
        }
    }

    /// Two venues; a team code, an individual code and a legacy table code.
    pub(crate) fn seed() -> StoreSeed {
        let mut team = qr("qr-team", "team1", QrType::Team);
        team.recipient_staff_ids = vec!["s1".into(), "s2".into(), "s3".into()];

        let mut solo = qr("qr-solo", "solo1", QrType::Individual);
        solo.staff_id = Some("s1".into());

        let mut table = qr("qr-table", "table1", QrType::Table);
        table.recipient_staff_ids = vec!["s3".into()];

        StoreSeed {
            venues: vec![venue("v1"), venue("v2")],
            staff: vec![
                staff("s1", "v1", "Zara", StaffStatus::Active),
                staff("s2", "v1", "Anna", StaffStatus::Active),
                staff("s3", "v1", "Mike", StaffStatus::Inactive),
                staff("s9", "v2", "Olga", StaffStatus::Active),
            ],
            qr_codes: vec![team, solo, table],
        }
    }

    #[tokio::test]
    async fn test_snapshot_resolves_links() {
        let store = InMemoryStore::from_seed(seed()).unwrap();

        let snap = store.snapshot_by_short_code("team1").await.unwrap();
        assert_eq!(snap.qr.id, "qr-team");
        assert_eq!(snap.venue.id, "v1");
        let names: Vec<_> = snap.recipients.iter().map(|r| r.staff.display_name.as_str()).collect();
        assert_eq!(names, vec!["Zara", "Anna", "Mike"]);

        let snap = store.snapshot_by_short_code("solo1").await.unwrap();
        assert_eq!(snap.staff.unwrap().id, "s1");

        assert!(store.snapshot_by_short_code("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_load_bundled_seed_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("seed.json");
        let store = InMemoryStore::load(&path).unwrap();

        let snap = store.snapshot_by_short_code("harbour-t12").await.unwrap();
        assert_eq!(snap.qr.qr_type, QrType::Table);
        assert_eq!(snap.recipients.len(), 2);
    }

    #[test]
    fn test_seed_with_dangling_staff_is_rejected() {
        let mut seed = seed();
        seed.qr_codes[0].recipient_staff_ids.push("ghost".into());
        assert!(matches!(
            InMemoryStore::from_seed(seed),
            Err(StoreError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_seed_with_staff_from_other_venue_is_rejected() {
        let mut team = seed();
        team.qr_codes[0].recipient_staff_ids.push("s9".into());
        assert!(matches!(
            InMemoryStore::from_seed(team),
            Err(StoreError::ForeignStaff { ref qr_id, ref staff_id }) if qr_id == "qr-team" && staff_id == "s9"
        ));

        let mut solo = seed();
        solo.qr_codes[1].staff_id = Some("s9".into());
        assert!(matches!(
            InMemoryStore::from_seed(solo),
            Err(StoreError::ForeignStaff { .. })
        ));
    }

    #[test]
    fn test_seed_with_duplicate_short_code_is_rejected() {
        let mut seed = seed();
        seed.qr_codes[1].code.short_code = "team1".into();
        assert!(matches!(
            InMemoryStore::from_seed(seed),
            Err(StoreError::DuplicateShortCode(ref c)) if c == "team1"
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_recipients() {
        let store = InMemoryStore::from_seed(seed()).unwrap();
        let update = QrUpdate {
            recipient_staff_ids: Some(vec!["s2".into(), "s1".into()]),
            label: Some(" Bar ".into()),
            ..Default::default()
        };

        let record = store.update_qr("qr-team", update).await.unwrap();
        assert_eq!(record.recipient_staff_ids, vec!["s2", "s1"]);
        assert_eq!(record.code.label.as_deref(), Some("Bar"));
    }

    #[tokio::test]
    async fn test_update_rejections_leave_record_untouched() {
        let store = InMemoryStore::from_seed(seed()).unwrap();
        let before = store.snapshot_by_short_code("team1").await.unwrap();

        let cases = vec![
            QrUpdate {
                qr_type: Some(QrType::Venue),
                ..Default::default()
            },
            QrUpdate {
                recipient_staff_ids: Some(vec!["s1".into()]),
                ..Default::default()
            },
            QrUpdate {
                recipient_staff_ids: Some(vec!["s1".into(), "s9".into()]),
                ..Default::default()
            },
            QrUpdate {
                recipient_staff_ids: Some(vec!["s1".into(), "s1".into()]),
                label: Some("New".into()),
                ..Default::default()
            },
        ];

        for update in cases {
            assert!(store.update_qr("qr-team", update).await.is_err());
        }
        assert_eq!(store.snapshot_by_short_code("team1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_error_kinds() {
        let store = InMemoryStore::from_seed(seed()).unwrap();

        let err = store
            .update_qr("qr-solo", QrUpdate {
                recipient_staff_ids: Some(vec!["s1".into(), "s2".into()]),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(UpdateRejection::InvalidOperation { .. })));

        let err = store
            .update_qr("qr-team", QrUpdate {
                recipient_staff_ids: Some(vec!["s1".into(), "s9".into()]),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownStaff(ref id) if id == "s9"));

        let err = store.update_qr("missing", QrUpdate::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::QrNotFound(_)));
    }
}
