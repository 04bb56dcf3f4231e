//! # Tip Eligibility Resolver
//!
//! Decides whether a guest landing on a QR code may go on to pay, and who
//! they can tip.
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve_tip_eligibility(snapshot)                                      │
//! │                                                                         │
//! │  1. qr.status != ACTIVE          ──► Err(QR_INACTIVE)                   │
//! │  2. venue.status != ACTIVE       ──► Err(VENUE_NOT_ACCEPTING)           │
//! │  3. !venue.payment_configured    ──► Err(PAYMENT_NOT_CONFIGURED)        │
//! │  4. classify(qr.qr_type)                                                │
//! │     ├── Individual                                                      │
//! │     │     staff present and inactive ──► Err(STAFF_INACTIVE)           │
//! │     │     otherwise ──► Ok(kind=INDIVIDUAL, staff, recipients=[])       │
//! │     └── Team                                                            │
//! │           keep ACTIVE recipients, sort by display name                  │
//! │           none left ──► Err(VENUE_NOT_ACCEPTING)                        │
//! │           otherwise ──► Ok(kind=TEAM, staff=None, recipients)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing gate wins. The function is pure: it clones what it
//! returns and never touches the snapshot.

use icu_collator::{CaseFirst, Collator, CollatorOptions, Strength};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::classifier::{classify, QrKind};
use crate::error::IneligibleReason;
use crate::types::{QrSnapshot, QrStatus, Recipient, Staff, VenueStatus};

/// Result type for eligibility decisions.
pub type EligibilityResult = Result<TipTarget, IneligibleReason>;

/// Who a guest can tip through a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TipTarget {
    pub kind: QrKind,

    /// The bound staff member of an individual-like code. May be absent
    /// when the code was printed before anyone was assigned.
    pub staff: Option<Staff>,

    /// Active recipients of a team-like code, in display order.
    pub recipients: Vec<Recipient>,
}

/// Resolves a snapshot into a tip target or the reason it cannot take tips.
pub fn resolve_tip_eligibility(snapshot: &QrSnapshot) -> EligibilityResult {
    let qr = &snapshot.qr;

    if qr.status != QrStatus::Active {
        return reject(snapshot, IneligibleReason::QrInactive);
    }

    if snapshot.venue.status != VenueStatus::Active {
        return reject(snapshot, IneligibleReason::VenueNotAccepting);
    }

    if !snapshot.venue.payment_configured {
        return reject(snapshot, IneligibleReason::PaymentNotConfigured);
    }

    if qr.qr_type.is_legacy() {
        debug!(
            qr_id = %qr.id,
            qr_type = %qr.qr_type,
            canonical = %qr.qr_type.canonical(),
            "Resolving legacy QR type"
        );
    }

    match classify(qr.qr_type) {
        QrKind::Individual => {
            if let Some(staff) = &snapshot.staff {
                if !staff.is_active() {
                    return reject(snapshot, IneligibleReason::StaffInactive);
                }
            }

            debug!(qr_id = %qr.id, staff_id = ?snapshot.staff.as_ref().map(|s| &s.id), "QR eligible");
            Ok(TipTarget {
                kind: QrKind::Individual,
                staff: snapshot.staff.clone(),
                recipients: Vec::new(),
            })
        }
        QrKind::Team => {
            let recipients = active_recipients(&snapshot.recipients);
            if recipients.is_empty() {
                return reject(snapshot, IneligibleReason::VenueNotAccepting);
            }

            debug!(
                qr_id = %qr.id,
                active = recipients.len(),
                configured = snapshot.recipients.len(),
                "QR eligible"
            );
            Ok(TipTarget {
                kind: QrKind::Team,
                staff: None,
                recipients,
            })
        }
    }
}

fn reject(snapshot: &QrSnapshot, reason: IneligibleReason) -> EligibilityResult {
    debug!(qr_id = %snapshot.qr.id, code = reason.code(), "QR not eligible for tips");
    Err(reason)
}

/// Active recipients ordered by display name. `sort_by` is stable, so names
/// that collate equal keep their configured order.
pub fn active_recipients(recipients: &[Recipient]) -> Vec<Recipient> {
    let mut active: Vec<Recipient> = recipients
        .iter()
        .filter(|r| r.staff.is_active())
        .cloned()
        .collect();

    NAME_COLLATOR.with(|collator| {
        active.sort_by(|a, b| {
            compare_with(collator.as_ref(), &a.staff.display_name, &b.staff.display_name)
        })
    });
    active
}

/// Display-name ordering under the Unicode Collation Algorithm.
///
/// Root locale at tertiary strength with lowercase first: accents and case
/// only break ties between names with the same letters ("Émile" < "Eve",
/// "anna" < "Anna"), and scripts sort by letter ("Ёлка" < "Яна").
pub fn compare_display_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR.with(|collator| compare_with(collator.as_ref(), a, b))
}

thread_local! {
    static NAME_COLLATOR: Option<Collator> = name_collator();
}

fn name_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    options.case_first = Some(CaseFirst::LowerFirst);

    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = ?e, "Name collator unavailable, ordering by code point");
            None
        }
    }
}

fn compare_with(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
