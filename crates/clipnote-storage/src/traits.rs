//! Storage abstraction trait
//!
//! This module defines the StorageWriter trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use clipnote_core::constants::MIB;
use clipnote_core::AppError;
use futures::Stream;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Body of an upload as delivered by the transport.
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + 'a>>;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage key already exists: {0}")]
    AlreadyExists(String),

    #[error("Payload exceeds the {limit} byte ceiling")]
    PayloadTooLarge { limit: u64 },

    #[error("Upload cancelled")]
    Cancelled,

    #[error("Upload stream failed: {0}")]
    StreamFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A fully written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub absolute_path: PathBuf,
    pub size_bytes: u64,
}

/// Storage writer trait
///
/// The upload gate only talks to storage through this trait, so an
/// object-storage backend can replace the local filesystem without touching
/// classification or naming.
#[async_trait]
pub trait StorageWriter: Send + Sync {
    /// Stream `stream` into `destination_dir/storage_key`.
    ///
    /// Implementations must:
    /// - fail with `AlreadyExists` before reading any byte when the key is taken,
    ///   leaving the stream untouched so the caller can retry with another key;
    /// - stop reading and fail with `PayloadTooLarge` as soon as more than
    ///   `ceiling_bytes` bytes were received;
    /// - stop with `Cancelled` once `cancel` fires;
    /// - leave nothing behind on any failure, and never expose a partially
    ///   written file under `storage_key`.
    async fn write(
        &self,
        stream: &mut ByteStream<'_>,
        destination_dir: &str,
        storage_key: &str,
        ceiling_bytes: u64,
        cancel: &CancellationToken,
    ) -> StorageResult<StoredFile>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

fn describe_limit(limit: u64) -> String {
    if limit >= MIB && limit % MIB == 0 {
        format!("{} MB", limit / MIB)
    } else {
        format!("{} bytes", limit)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PayloadTooLarge { limit } => AppError::PayloadTooLarge(format!(
                "File size exceeds maximum allowed size of {}",
                describe_limit(limit)
            )),
            StorageError::Cancelled => {
                AppError::UploadInterrupted("Upload was cancelled".to_string())
            }
            StorageError::StreamFailed(msg) => AppError::UploadInterrupted(msg),
            other => AppError::StorageFailure(other.to_string()),
        }
    }
}
