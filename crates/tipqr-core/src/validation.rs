//! # Validation Module
//!
//! Field-level checks run by the HTTP layer before the engine is called.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  └── Immediate feedback on the tip form                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: tip-api handler (Rust)                                       │
//! │  ├── Deserialization (unknown QR tags fail here)                       │
//! │  └── THIS MODULE: amounts, labels, short codes                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine (eligibility / update rules)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_LABEL_LEN, MAX_SHORT_CODE_LEN, MAX_TIP_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a tip amount.
///
/// ## Rules
/// - Must be strictly positive
/// - Must not exceed `MAX_TIP_CENTS`
///
/// ## Example
/// ```rust
/// use tipqr_core::money::Money;
/// use tipqr_core::validation::validate_tip_amount;
///
/// assert!(validate_tip_amount(Money::from_cents(500)).is_ok());
/// assert!(validate_tip_amount(Money::from_cents(0)).is_err());
/// ```
pub fn validate_tip_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() || amount.cents() > MAX_TIP_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: MAX_TIP_CENTS,
        });
    }

    Ok(())
}

/// Validates an optional QR label and normalizes it.
///
/// Blank labels become `None`. Returns the trimmed label otherwise.
pub fn validate_label(label: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
        return Ok(None);
    };

    if label.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: "label".to_string(),
            max: MAX_LABEL_LEN,
        });
    }

    Ok(Some(label.to_string()))
}

/// Validates the short code taken from a scanned URL.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_SHORT_CODE_LEN` characters
/// - ASCII letters, digits, hyphens and underscores only
pub fn validate_short_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "short_code".to_string(),
        });
    }

    if code.len() > MAX_SHORT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "short_code".to_string(),
            max: MAX_SHORT_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "short_code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
