//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use clipnote_core::{Channel, Config};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        upload_root = %config.upload_root().display(),
        image_max_bytes = config.ceiling_for(Channel::Image),
        video_max_bytes = config.ceiling_for(Channel::Video),
        max_name_attempts = config.max_name_attempts(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(&config).await?;
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
