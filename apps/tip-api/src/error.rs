//! # API Error Type
//!
//! Unified error type for tip-api handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler                                                                │
//! │  Result<T, ApiError>                                                    │
//! │       │                                                                 │
//! │       ├── IneligibleReason ──► 410 / 409 / 500   { code, error }        │
//! │       ├── UpdateRejection ───► 400               { code, message }      │
//! │       ├── TipError ──────────► 400               { code, message }      │
//! │       ├── StoreError ────────► 404 / 400 / 500   { code, message }      │
//! │       ├── JsonRejection ─────► 400 / 415 / 422   { code, message }      │
//! │       └── ValidationError ───► 400               { code, message }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guest tip page reads `error`; dashboard forms read `message`. Both get
//! a stable machine-readable `code`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use tipqr_core::{IneligibleReason, TipError, UpdateRejection, ValidationError};

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The guest cannot tip through this QR code.
    #[error(transparent)]
    Ineligible(#[from] IneligibleReason),

    #[error(transparent)]
    UpdateRejected(#[from] UpdateRejection),

    #[error(transparent)]
    Tip(#[from] TipError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body was not valid JSON for the route.
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("QR code not found: {0}")]
    NotFound(String),

    #[error("Staff member {0} does not belong to this venue")]
    UnknownStaff(String),

    #[error("Staff member {0} is listed more than once")]
    DuplicateStaff(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Ineligible(reason) => match reason {
                IneligibleReason::QrInactive => StatusCode::GONE,
                IneligibleReason::VenueNotAccepting
                | IneligibleReason::PaymentNotConfigured
                | IneligibleReason::StaffInactive => StatusCode::CONFLICT,
                IneligibleReason::InvalidQrType => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::UpdateRejected(_)
            | ApiError::Tip(_)
            | ApiError::Validation(_)
            | ApiError::UnknownStaff(_)
            | ApiError::DuplicateStaff(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Ineligible(reason) => reason.code(),
            ApiError::UpdateRejected(rejection) => rejection.code(),
            ApiError::Tip(err) => err.code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::InvalidBody(_) => "INVALID_BODY",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UnknownStaff(_) => "UNKNOWN_STAFF",
            ApiError::DuplicateStaff(_) => "DUPLICATE_STAFF",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::QrNotFound(id) => ApiError::NotFound(id),
            StoreError::UnknownStaff(id) => ApiError::UnknownStaff(id),
            StoreError::DuplicateStaff(id) => ApiError::DuplicateStaff(id),
            StoreError::Rejected(rejection) => ApiError::UpdateRejected(rejection),
            StoreError::Invalid(e) => ApiError::Validation(e),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let body = match &self {
            ApiError::Ineligible(reason) => json!({ "code": code, "error": reason.to_string() }),
            ApiError::Internal(detail) => {
                // Log the actual error but return a generic message
                error!(detail = %detail, "Internal error");
                json!({ "code": code, "message": self.to_string() })
            }
            _ => json!({ "code": code, "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
