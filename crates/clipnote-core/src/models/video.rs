use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::upload::UploadResult;

/// Metadata record the data layer stores for an uploaded video.
///
/// Rows are never removed: deletion sets `delete_time` and clears `status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoRecord {
    pub video_id: Uuid,
    pub user_id: Uuid,
    /// Storage key of the file.
    pub file_name: String,
    pub original_name: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub upload_time: DateTime<Utc>,
    pub status: bool,
    pub delete_time: Option<DateTime<Utc>>,
}

impl VideoRecord {
    /// Build the record for a completed upload owned by `user_id`.
    pub fn from_upload(user_id: Uuid, upload: &UploadResult, url: impl Into<String>) -> Self {
        Self {
            video_id: Uuid::new_v4(),
            user_id,
            file_name: upload.storage_key.clone(),
            original_name: upload.original_name.clone(),
            url: url.into(),
            size: i64::try_from(upload.size_bytes).unwrap_or(i64::MAX),
            mime_type: upload.mime_type.clone(),
            upload_time: Utc::now(),
            status: true,
            delete_time: None,
        }
    }

    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        if self.delete_time.is_none() {
            self.delete_time = Some(now);
        }
        self.status = false;
    }

    pub fn is_deleted(&self) -> bool {
        self.delete_time.is_some()
    }
}
