//! # Guest Response Shapes
//!
//! What the guest tip page receives after a successful resolution.
//!
//! ```json
//! {
//!   "id": "qr-1",
//!   "type": "TEAM",
//!   "label": "Bar",
//!   "venue": { "id": "venue-1", "name": "Harbour Bar", "logoUrl": null },
//!   "staff": null,
//!   "recipients": [
//!     { "id": "s2", "displayName": "Anna", "role": "Bartender", "avatarUrl": null }
//!   ]
//! }
//! ```
//!
//! `type` is the semantic kind, never the stored legacy tag.

use serde::Serialize;
use ts_rs::TS;

use crate::classifier::QrKind;
use crate::eligibility::TipTarget;
use crate::types::{QrSnapshot, Staff, Venue};

/// Public view of a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VenueView {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
}

impl From<&Venue> for VenueView {
    fn from(venue: &Venue) -> Self {
        VenueView {
            id: venue.id.clone(),
            name: venue.name.clone(),
            logo_url: venue.logo_url.clone(),
        }
    }
}

/// Public view of a staff member. Status is not exposed; only active staff
/// ever reach a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffView {
    pub id: String,
    pub display_name: String,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&Staff> for StaffView {
    fn from(staff: &Staff) -> Self {
        StaffView {
            id: staff.id.clone(),
            display_name: staff.display_name.clone(),
            role: staff.role.clone(),
            avatar_url: staff.avatar_url.clone(),
        }
    }
}

/// Body of a successful guest tip-resolution response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GuestTipResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QrKind,
    pub label: Option<String>,
    pub venue: VenueView,
    pub staff: Option<StaffView>,
    pub recipients: Vec<StaffView>,
}

impl GuestTipResponse {
    /// Shapes a resolved target for the guest page.
    pub fn new(snapshot: &QrSnapshot, target: &TipTarget) -> Self {
        GuestTipResponse {
            id: snapshot.qr.id.clone(),
            kind: target.kind,
            label: snapshot.qr.label.clone(),
            venue: VenueView::from(&snapshot.venue),
            staff: target.staff.as_ref().map(StaffView::from),
            recipients: target
                .recipients
                .iter()
                .map(|r| StaffView::from(&r.staff))
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
