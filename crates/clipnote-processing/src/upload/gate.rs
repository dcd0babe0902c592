//! Upload gate.
//!
//! Sequences one upload attempt: the declared content type is classified
//! before any I/O, a storage key is minted, and the body is streamed to the
//! storage writer, which enforces the channel ceiling mid-stream. A key that
//! is already taken is re-rolled up to `max_attempts` times.
//!
//! The gate holds no per-request state; a single instance is shared by all
//! request handlers.

use std::sync::Arc;

use clipnote_core::{AppError, Channel, Config, UploadResult};
use clipnote_storage::{StorageError, StorageWriter};
use tokio_util::sync::CancellationToken;

use super::types::{ChannelLimits, MultipartField};
use crate::naming::NameGenerator;
use crate::validator::classify;

#[derive(Clone)]
pub struct UploadGate {
    storage: Arc<dyn StorageWriter>,
    names: NameGenerator,
    limits: ChannelLimits,
    max_attempts: u32,
}

impl UploadGate {
    pub fn new(
        storage: Arc<dyn StorageWriter>,
        names: NameGenerator,
        limits: ChannelLimits,
        max_attempts: u32,
    ) -> Self {
        Self {
            storage,
            names,
            limits,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &Config, storage: Arc<dyn StorageWriter>) -> Self {
        Self::new(
            storage,
            NameGenerator::new(),
            ChannelLimits {
                image_max_bytes: config.ceiling_for(Channel::Image),
                video_max_bytes: config.ceiling_for(Channel::Video),
            },
            config.max_name_attempts(),
        )
    }

    pub fn ceiling_for(&self, channel: Channel) -> u64 {
        match channel {
            Channel::Image => self.limits.image_max_bytes,
            Channel::Video => self.limits.video_max_bytes,
        }
    }

    /// Run one upload attempt to completion.
    pub async fn handle(
        &self,
        channel: Channel,
        field: MultipartField<'_>,
    ) -> Result<UploadResult, AppError> {
        self.handle_cancellable(channel, field, &CancellationToken::new())
            .await
    }

    /// Run one upload attempt, aborting with cleanup once `cancel` fires.
    pub async fn handle_cancellable(
        &self,
        channel: Channel,
        field: MultipartField<'_>,
        cancel: &CancellationToken,
    ) -> Result<UploadResult, AppError> {
        let MultipartField {
            original_name,
            declared_mime_type,
            mut body,
        } = field;

        if let Err(e) = classify(&declared_mime_type, channel) {
            tracing::debug!(
                channel = %channel,
                content_type = %declared_mime_type,
                original_name = %original_name,
                "Upload rejected by content classifier"
            );
            return Err(e.into());
        }

        let ceiling_bytes = self.ceiling_for(channel);

        for attempt in 0..self.max_attempts {
            let storage_key = self.names.generate(&original_name, attempt);

            match self
                .storage
                .write(
                    &mut body,
                    channel.dir_name(),
                    &storage_key,
                    ceiling_bytes,
                    cancel,
                )
                .await
            {
                Ok(stored) => {
                    tracing::info!(
                        channel = %channel,
                        storage_key = %storage_key,
                        original_name = %original_name,
                        size_bytes = stored.size_bytes,
                        attempt,
                        "Upload completed"
                    );
                    return Ok(UploadResult {
                        storage_key,
                        absolute_path: stored.absolute_path,
                        original_name,
                        mime_type: declared_mime_type,
                        size_bytes: stored.size_bytes,
                        channel,
                    });
                }
                Err(StorageError::AlreadyExists(_)) => {
                    tracing::warn!(
                        channel = %channel,
                        storage_key = %storage_key,
                        attempt,
                        "Storage key collision, generating a new key"
                    );
                }
                Err(e) => {
                    match &e {
                        StorageError::PayloadTooLarge { .. }
                        | StorageError::Cancelled
                        | StorageError::StreamFailed(_) => {
                            tracing::debug!(
                                channel = %channel,
                                storage_key = %storage_key,
                                error = %e,
                                "Upload aborted"
                            );
                        }
                        _ => {
                            tracing::error!(
                                channel = %channel,
                                storage_key = %storage_key,
                                error = %e,
                                "Failed to write upload to storage"
                            );
                        }
                    }
                    return Err(e.into());
                }
            }
        }

        tracing::error!(
            channel = %channel,
            original_name = %original_name,
            attempts = self.max_attempts,
            "No free storage key found"
        );
        Err(AppError::StorageExhausted {
            attempts: self.max_attempts,
        })
    }
}
