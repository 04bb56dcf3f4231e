//! # Tip Preparation
//!
//! Turns an eligible [`TipTarget`] plus the guest's choices into a
//! [`TipDraft`] the payment collaborator can charge.
//!
//! ## Guest Workflow
//! ```text
//! Scan QR ──► resolve_tip_eligibility ──► TipTarget
//!                                            │
//!               guest picks amount (+ optionally a staff member)
//!                                            │
//!                                            ▼
//!                              prepare_tip ──► TipDraft
//!                                            │
//!                                            ▼
//!                          payment provider (out of this crate)
//! ```
//!
//! Every draft is addressed as `PERSONAL`, whichever kind of code it came
//! from and whether or not a staff member was picked. Pooled tips are gone.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::classifier::QrKind;
use crate::eligibility::TipTarget;
use crate::error::TipError;
use crate::money::Money;
use crate::types::QrSnapshot;
use crate::validation::validate_tip_amount;

/// How a created tip is disbursed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipRecipientType {
    #[default]
    Personal,
}

/// What the guest submitted on the tip form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TipRequest {
    #[serde(rename = "amountCents")]
    pub amount: Money,

    /// Staff member picked by the guest, if any.
    #[serde(default)]
    pub staff_id: Option<String>,
}

/// A tip ready to be charged. Identity and timestamps are assigned by the
/// caller when it persists the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TipDraft {
    pub qr_code_id: String,
    pub venue_id: String,
    pub staff_id: Option<String>,
    #[serde(rename = "amountCents")]
    pub amount: Money,
    pub recipient_type: TipRecipientType,
}

/// Builds a draft for `request` against a target resolved from `snapshot`.
///
/// ## Rules
/// - Amount must pass [`validate_tip_amount`]
/// - Individual: a picked staff id must be the bound staff member; the draft
///   always goes to the bound staff member (if any)
/// - Team: a picked staff id must be one of the active recipients; no pick
///   leaves the draft unaddressed
pub fn prepare_tip(
    snapshot: &QrSnapshot,
    target: &TipTarget,
    request: &TipRequest,
) -> Result<TipDraft, TipError> {
    validate_tip_amount(request.amount)?;

    let staff_id = match target.kind {
        QrKind::Individual => {
            let bound = target.staff.as_ref().map(|s| s.id.clone());
            if let Some(picked) = &request.staff_id {
                if bound.as_deref() != Some(picked.as_str()) {
                    return Err(TipError::RecipientNotAvailable {
                        staff_id: picked.clone(),
                    });
                }
            }
            bound
        }
        QrKind::Team => match &request.staff_id {
            Some(picked) => {
                if !target.recipients.iter().any(|r| &r.staff.id == picked) {
                    return Err(TipError::RecipientNotAvailable {
                        staff_id: picked.clone(),
                    });
                }
                Some(picked.clone())
            }
            None => None,
        },
    };

    debug!(
        qr_id = %snapshot.qr.id,
        staff_id = ?staff_id,
        amount = %request.amount,
        "Tip draft prepared"
    );

    Ok(TipDraft {
        qr_code_id: snapshot.qr.id.clone(),
        venue_id: snapshot.venue.id.clone(),
        staff_id,
        amount: request.amount,
        recipient_type: TipRecipientType::Personal,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
