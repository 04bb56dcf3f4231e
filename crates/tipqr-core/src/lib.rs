//! # tipqr-core: QR-to-Tip Decision Engine
//!
//! Pure decision logic for QR tipping: given a snapshot of a QR code, its
//! venue and its staff, decide whether a guest can tip and who they can tip,
//! and whether an edit to the code is allowed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Frontend (guest tip page / dashboard)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     tip-api (axum)                              │   │
//! │  │   loads snapshots, maps results to status codes, applies edits  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ in-process calls                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tipqr-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐  ┌──────────┐  ┌──────────┐                 │   │
//! │  │   │ eligibility │  │  update  │  │   tip    │                 │   │
//! │  │   │  resolver   │  │ validator│  │  drafts  │                 │   │
//! │  │   └──────┬──────┘  └────┬─────┘  └──────────┘                 │   │
//! │  │          └──────┬───────┘                                      │   │
//! │  │          ┌──────▼──────┐                                       │   │
//! │  │          │ classifier  │  tag → kind                           │   │
//! │  │          └─────────────┘                                       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Snapshot types (QrCode, Venue, Staff, Recipient)
//! - [`classifier`] - Five stored tags → two semantic kinds
//! - [`eligibility`] - Can a guest tip through this code, and whom?
//! - [`update`] - Is this edit to a QR code allowed?
//! - [`tip`] - Tip drafts for the payment collaborator
//! - [`response`] - Guest-facing JSON shapes
//! - [`money`] - Integer minor-unit amounts
//! - [`validation`] - Field-level request checks
//! - [`error`] - Error and rejection types
//!
//! ## Example Usage
//!
//! ```rust
//! use tipqr_core::eligibility::resolve_tip_eligibility;
//! use tipqr_core::{QrCode, QrSnapshot, QrStatus, QrType, Venue, VenueStatus};
//! use tipqr_core::IneligibleReason;
//!
//! let snapshot = QrSnapshot {
//!     qr: QrCode {
//!         id: "qr-1".to_string(),
//!         short_code: "bar1".to_string(),
//!         qr_type: QrType::Table,
//!         status: QrStatus::Active,
//!         label: None,
//!         venue_id: "venue-1".to_string(),
//!     },
//!     venue: Venue {
//!         id: "venue-1".to_string(),
//!         name: "Harbour Bar".to_string(),
//!         logo_url: None,
//!         status: VenueStatus::Active,
//!         payment_configured: true,
//!     },
//!     staff: None,
//!     recipients: Vec::new(),
//! };
//!
//! // A team-like code with nobody on it is "not accepting"
//! assert_eq!(
//!     resolve_tip_eligibility(&snapshot),
//!     Err(IneligibleReason::VenueNotAccepting)
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classifier;
pub mod eligibility;
pub mod error;
pub mod money;
pub mod response;
pub mod tip;
pub mod types;
pub mod update;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use classifier::{classify, QrKind};
pub use eligibility::{resolve_tip_eligibility, TipTarget};
pub use error::{CoreError, IneligibleReason, TipError, UpdateRejection, ValidationError};
pub use money::Money;
pub use types::*;
pub use update::{validate_qr_update, QrUpdate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum recipients on a team-like QR code.
///
/// A team code with one recipient is an individual code in disguise; the
/// venue has to change the type instead.
pub const MIN_TEAM_RECIPIENTS: usize = 2;

/// Largest single tip accepted, in minor units.
pub const MAX_TIP_CENTS: i64 = 100_000;

/// Longest QR label shown on stickers and the guest page.
pub const MAX_LABEL_LEN: usize = 100;

/// Longest short code accepted from a scanned URL.
pub const MAX_SHORT_CODE_LEN: usize = 32;
