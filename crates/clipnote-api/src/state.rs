//! Application state shared by all handlers.

use clipnote_core::Config;
use clipnote_processing::UploadGate;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gate: UploadGate,
    /// Cancelled when the server begins shutting down; in-flight uploads
    /// observe a child token and abort with cleanup.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: Config, gate: UploadGate) -> Self {
        Self {
            config,
            gate,
            shutdown: CancellationToken::new(),
        }
    }

    /// Public URL of a stored file.
    pub fn public_url(&self, dir_name: &str, storage_key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.public_base_url().trim_end_matches('/'),
            dir_name,
            storage_key
        )
    }
}
