//! Common utilities for file upload handlers

use axum::extract::Multipart;
use clipnote_core::{AppError, Channel, UploadResult};
use clipnote_processing::{MultipartField, UploadGate};
use clipnote_storage::ByteStream;
use futures::TryStreamExt;
use std::io;
use tokio_util::sync::CancellationToken;

use crate::constants::FILE_FIELD;

const DEFAULT_FILENAME: &str = "unknown";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Stream the first field named `file` through the upload gate.
///
/// Fields with other names that precede it are skipped. The body is never
/// buffered: chunks flow from the connection straight into the storage
/// writer, which enforces the channel ceiling. Anything after the file
/// field is left unread.
pub async fn store_multipart_file(
    gate: &UploadGate,
    channel: Channel,
    mut multipart: Multipart,
    cancel: &CancellationToken,
) -> Result<UploadResult, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let original_name = field
            .file_name()
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let body: ByteStream<'_> = Box::pin(field.map_err(io::Error::other));

        return gate
            .handle_cancellable(
                channel,
                MultipartField::new(original_name, content_type, body),
                cancel,
            )
            .await;
    }

    Err(AppError::InvalidInput("No file provided".to_string()))
}
