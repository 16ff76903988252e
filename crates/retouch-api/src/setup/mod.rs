//! Application setup and initialization

pub mod routes;
pub mod server;

pub use routes::build_router;

use crate::state::AppState;
use anyhow::{Context, Result};
use retouch_core::Config;
use std::sync::Arc;

/// Validate config, start tracing and wire the production state into a router.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    retouch_infra::init_telemetry(config.log_format)?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let state = Arc::new(AppState::new(config));
    let router = build_router(state.clone())?;

    Ok((state, router))
}
