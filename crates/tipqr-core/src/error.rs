//! # Error Types
//!
//! Domain-specific error types for tipqr-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tipqr-core errors (this file)                                         │
//! │  ├── CoreError         - Parse-boundary errors (unknown QR tags)       │
//! │  ├── ValidationError   - Input validation failures                     │
//! │  ├── IneligibleReason  - Why a guest cannot tip through a QR code      │
//! │  ├── UpdateRejection   - Why a QR code update is refused               │
//! │  └── TipError          - Why a tip draft cannot be prepared            │
//! │                                                                         │
//! │  tip-api errors (app)                                                  │
//! │  └── ApiError          - What the HTTP client sees (code + message)    │
//! │                                                                         │
//! │  Flow: IneligibleReason / UpdateRejection → ApiError → JSON body       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every business rejection has a stable SCREAMING_SNAKE_CASE `code()`
//! 3. `Display` is the human-readable message; the HTTP layer localizes
//! 4. Rejections are returned as values, never panics

use thiserror::Error;

use crate::types::QrType;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised at the parse boundary.
///
/// These are not business outcomes. A stored tag that does not parse means
/// the data is corrupt and the caller should stop, not show the guest a
/// friendly message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A raw QR type tag outside the five known spellings.
    #[error("Unknown QR type tag: '{0}'")]
    UnknownQrType(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of request fields before the engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., bad short code characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Ineligible Reason
// =============================================================================

/// Why a guest scanning a QR code cannot be routed into the payment flow.
///
/// ## Gate Order
/// ```text
/// QR inactive? ──► QR_INACTIVE
///      │
/// Venue inactive? ──► VENUE_NOT_ACCEPTING
///      │
/// Payment not configured? ──► PAYMENT_NOT_CONFIGURED
///      │
/// Individual: staff inactive? ──► STAFF_INACTIVE
/// Team: no active recipients? ──► VENUE_NOT_ACCEPTING
/// ```
///
/// A team code with nobody available reports `VENUE_NOT_ACCEPTING`, the same
/// code as a disabled venue. There is no separate "no recipients" code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IneligibleReason {
    #[error("This QR code is no longer active")]
    QrInactive,

    #[error("This venue is not accepting tips right now")]
    VenueNotAccepting,

    #[error("This venue has not finished setting up payments")]
    PaymentNotConfigured,

    #[error("This staff member is not accepting tips right now")]
    StaffInactive,

    /// Kept in the taxonomy for clients that switch on it. `QrType` is a
    /// closed enum, so the resolver has no path that produces it.
    #[error("This QR code has an invalid type")]
    InvalidQrType,
}

impl IneligibleReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            IneligibleReason::QrInactive => "QR_INACTIVE",
            IneligibleReason::VenueNotAccepting => "VENUE_NOT_ACCEPTING",
            IneligibleReason::PaymentNotConfigured => "PAYMENT_NOT_CONFIGURED",
            IneligibleReason::StaffInactive => "STAFF_INACTIVE",
            IneligibleReason::InvalidQrType => "INVALID_QR_TYPE",
        }
    }
}

// =============================================================================
// Update Rejection
// =============================================================================

/// Why a proposed QR code update is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateRejection {
    /// The raw stored tag may never change, even between aliases of the
    /// same kind (`TABLE` → `VENUE` is still a change).
    #[error("QR code type cannot be changed from {from} to {to}")]
    TypeChangeNotAllowed { from: QrType, to: QrType },

    /// Recipients were sent for a code that cannot hold a recipient list.
    #[error("{qr_type} QR codes cannot have a recipient list")]
    InvalidOperation { qr_type: QrType },

    #[error("Team QR codes need at least {min} recipients, got {given}")]
    MinRecipientsRequired { min: usize, given: usize },
}

impl UpdateRejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            UpdateRejection::TypeChangeNotAllowed { .. } => "TYPE_CHANGE_NOT_ALLOWED",
            UpdateRejection::InvalidOperation { .. } => "INVALID_OPERATION",
            UpdateRejection::MinRecipientsRequired { .. } => "MIN_RECIPIENTS_REQUIRED",
        }
    }
}

// =============================================================================
// Tip Error
// =============================================================================

/// Why a tip draft cannot be prepared from an eligible target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TipError {
    /// The guest picked someone who is not an active recipient of this code.
    #[error("Staff member {staff_id} is not available on this QR code")]
    RecipientNotAvailable { staff_id: String },

    #[error("Invalid tip amount: {0}")]
    InvalidAmount(#[from] ValidationError),
}

impl TipError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            TipError::RecipientNotAvailable { .. } => "RECIPIENT_NOT_AVAILABLE",
            TipError::InvalidAmount(_) => "INVALID_AMOUNT",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
