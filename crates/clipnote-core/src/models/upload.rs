//! Descriptor produced by a completed upload.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::channel::Channel;

/// Result of a completed upload attempt.
///
/// Only built once the whole byte stream was accepted and the file sits
/// fully written at `absolute_path`. The caller owns persistence of any
/// metadata derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub storage_key: String,
    pub absolute_path: PathBuf,
    /// Client-supplied filename, untrusted.
    pub original_name: String,
    /// Client-declared content type, untrusted.
    pub mime_type: String,
    pub size_bytes: u64,
    pub channel: Channel,
}
