//! # tip-api
//!
//! HTTP collaborator for the QR tip engine. It owns everything the engine
//! does not: loading snapshots, status codes, JSON bodies and applying edits.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod store;

use axum::routing::{get, patch};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::store::InMemoryStore;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
}

impl AppState {
    pub fn new(store: InMemoryStore) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/tip/{short_code}",
            get(handlers::resolve_tip).post(handlers::create_tip),
        )
        .route("/api/qr/{id}", patch(handlers::update_qr))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
