pub mod image_upload;
pub mod video_upload;

use clipnote_core::{Channel, UploadResult};
use serde::Serialize;

use crate::state::AppState;

/// Body returned for a completed upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub storage_key: String,
    pub url: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub channel: Channel,
}

impl UploadResponse {
    pub fn from_result(state: &AppState, result: UploadResult) -> Self {
        let url = state.public_url(result.channel.dir_name(), &result.storage_key);
        Self {
            storage_key: result.storage_key,
            url,
            original_name: result.original_name,
            mime_type: result.mime_type,
            size: result.size_bytes,
            channel: result.channel,
        }
    }
}
