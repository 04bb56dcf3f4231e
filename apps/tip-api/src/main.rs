//! # tip-api binary
//!
//! ## Startup Sequence
//! 1. Load configuration (TOML file + environment)
//! 2. Initialize tracing (logging)
//! 3. Load seed data into the in-memory store
//! 4. Serve until Ctrl+C

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tipqr_api::config::ApiConfig;
use tipqr_api::store::InMemoryStore;
use tipqr_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load()?;
    init_tracing(&config.log_filter);

    let store = match &config.seed_path {
        Some(path) => InMemoryStore::load(path)?,
        None => InMemoryStore::default(),
    };

    let app = create_router(AppState::new(store));
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(addr = %config.bind_address(), "tip-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("tip-api stopped");
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured filter applies.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
