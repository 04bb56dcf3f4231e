//! # Request Handlers
//!
//! ```text
//! GET   /health                 ──► liveness
//! GET   /api/tip/{short_code}   ──► resolve_tip   (guest tip page)
//! POST  /api/tip/{short_code}   ──► create_tip    (guest submits amount)
//! PATCH /api/qr/{id}            ──► update_qr     (venue dashboard)
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use tipqr_core::response::GuestTipResponse;
use tipqr_core::tip::{prepare_tip, TipDraft, TipRequest};
use tipqr_core::validation::validate_short_code;
use tipqr_core::{resolve_tip_eligibility, QrSnapshot, QrUpdate, TipTarget};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::store::QrRecord;
use crate::AppState;

/// A draft accepted for payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTip {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub draft: TipDraft,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn resolve_tip(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<GuestTipResponse>, ApiError> {
    let (snapshot, target) = load_target(&state, &short_code).await?;
    Ok(Json(GuestTipResponse::new(&snapshot, &target)))
}

pub async fn create_tip(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
    ApiJson(request): ApiJson<TipRequest>,
) -> Result<(StatusCode, Json<CreatedTip>), ApiError> {
    let (snapshot, target) = load_target(&state, &short_code).await?;
    let draft = prepare_tip(&snapshot, &target, &request)?;

    let tip = CreatedTip {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        draft,
    };
    info!(tip_id = %tip.id, qr_id = %tip.draft.qr_code_id, amount = %tip.draft.amount, "Tip created");

    Ok((StatusCode::CREATED, Json(tip)))
}

pub async fn update_qr(
    State(state): State<AppState>,
    Path(qr_id): Path<String>,
    ApiJson(update): ApiJson<QrUpdate>,
) -> Result<Json<QrRecord>, ApiError> {
    let record = state.store.update_qr(&qr_id, update).await?;
    Ok(Json(record))
}

async fn load_target(state: &AppState, short_code: &str) -> Result<(QrSnapshot, TipTarget), ApiError> {
    validate_short_code(short_code)?;

    let snapshot = state
        .store
        .snapshot_by_short_code(short_code)
        .await
        .ok_or_else(|| ApiError::NotFound(short_code.to_string()))?;

    let target = resolve_tip_eligibility(&snapshot)?;
    Ok((snapshot, target))
}
