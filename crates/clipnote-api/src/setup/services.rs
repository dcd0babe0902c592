//! Storage and upload gate wiring

use crate::state::AppState;
use anyhow::{Context, Result};
use clipnote_core::Config;
use clipnote_processing::UploadGate;
use clipnote_storage::create_storage;
use std::sync::Arc;

/// Build the shared application state from configuration.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;

    tracing::info!(backend = %storage.backend_type(), "Storage initialized");

    let gate = UploadGate::from_config(config, storage);
    Ok(Arc::new(AppState::new(config.clone(), gate)))
}
