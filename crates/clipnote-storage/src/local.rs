use crate::keys::{part_file_name, validate_dir, validate_key};
use crate::traits::{ByteStream, StorageError, StorageResult, StorageWriter, StoredFile};
use crate::StorageBackend;
use async_trait::async_trait;
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for uploads (e.g., "public/uploads").
    ///   It is created if missing and stored in canonical form so every
    ///   returned path is absolute.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let base_path = fs::canonicalize(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Ensure the channel directory exists and return it.
    async fn ensure_dir(&self, destination_dir: &str) -> StorageResult<PathBuf> {
        validate_dir(destination_dir)?;
        let dir = self.base_path.join(destination_dir);
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(dir)
    }
}

/// Paths created by an in-flight upload; removed on drop unless committed.
///
/// Dropping covers every early return as well as the request future being
/// dropped when the client goes away.
struct PartialUpload {
    paths: Vec<PathBuf>,
    committed: bool,
}

impl PartialUpload {
    fn new(reserved: PathBuf) -> Self {
        Self {
            paths: vec![reserved],
            committed: false,
        }
    }

    fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    fn commit(&mut self) {
        self.committed = true;
    }
}

impl Drop for PartialUpload {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to remove partial upload"
                    );
                }
            }
        }
    }
}

#[async_trait]
impl StorageWriter for LocalStorage {
    async fn write(
        &self,
        stream: &mut ByteStream<'_>,
        destination_dir: &str,
        storage_key: &str,
        ceiling_bytes: u64,
        cancel: &CancellationToken,
    ) -> StorageResult<StoredFile> {
        validate_key(storage_key)?;
        let dir = self.ensure_dir(destination_dir).await?;
        let path = dir.join(storage_key);
        let part_path = dir.join(part_file_name(storage_key));
        let start = std::time::Instant::now();

        // Reserve the key. An existing file means the name is taken.
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(storage_key.to_string()));
            }
            Err(e) => {
                return Err(StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )));
            }
        }
        let mut guard = PartialUpload::new(path.clone());

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&part_path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    part_path.display(),
                    e
                ))
            })?;
        guard.track(part_path.clone());

        let mut size_bytes: u64 = 0;
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(key = %storage_key, size_bytes, "Local storage write cancelled");
                    return Err(StorageError::Cancelled);
                }
                next = stream.next() => next,
            };

            let Some(chunk) = next else {
                break;
            };
            let chunk = chunk.map_err(|e| StorageError::StreamFailed(e.to_string()))?;

            size_bytes = size_bytes.saturating_add(chunk.len() as u64);
            if size_bytes > ceiling_bytes {
                tracing::debug!(
                    key = %storage_key,
                    ceiling_bytes,
                    received_bytes = size_bytes,
                    "Upload exceeded ceiling, aborting"
                );
                return Err(StorageError::PayloadTooLarge {
                    limit: ceiling_bytes,
                });
            }

            file.write_all(&chunk).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    part_path.display(),
                    e
                ))
            })?;
        }

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to sync file {}: {}",
                part_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(&part_path, &path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to publish file {}: {}",
                path.display(),
                e
            ))
        })?;
        guard.commit();

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredFile {
            absolute_path: path,
            size_bytes,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;
    use std::io;
    use tempfile::tempdir;

    fn chunked(data: &[u8], chunk_size: usize) -> ByteStream<'static> {
        let chunks: Vec<io::Result<Bytes>> = data
            .chunks(chunk_size)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Box::pin(stream::iter(chunks))
    }

    fn list(dir: &Path) -> Vec<String> {
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect();
                names.sort();
                names
            }
            Err(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_local_storage_write_round_trip() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut body = chunked(&data, 1024);

        let stored = storage
            .write(&mut body, "images", "1-2.png", 1 << 20, &CancellationToken::new())
            .await
            .unwrap();

        assert!(stored.absolute_path.is_absolute());
        assert!(stored.absolute_path.ends_with("images/1-2.png"));
        assert_eq!(stored.size_bytes, data.len() as u64);
        assert_eq!(std::fs::read(&stored.absolute_path).unwrap(), data);
        assert_eq!(list(&dir.path().join("images")), vec!["1-2.png"]);
    }

    #[tokio::test]
    async fn test_exact_ceiling_is_accepted() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let mut body = chunked(&[7u8; 64], 10);

        let stored = storage
            .write(&mut body, "images", "1-2.bin", 64, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(stored.size_bytes, 64);
    }

    #[tokio::test]
    async fn test_ceiling_exceeded_leaves_nothing() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let mut body = chunked(&[1u8; 65], 10);

        let result = storage
            .write(&mut body, "images", "1-2.bin", 64, &CancellationToken::new())
            .await;

        assert!(matches!(
            result,
            Err(StorageError::PayloadTooLarge { limit: 64 })
        ));
        assert!(list(&dir.path().join("images")).is_empty());
    }

    #[tokio::test]
    async fn test_existing_key_is_reported_without_consuming_stream() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        std::fs::create_dir_all(dir.path().join("videos")).unwrap();
        std::fs::write(dir.path().join("videos/1-2.mp4"), b"first").unwrap();

        let mut body = chunked(b"second", 3);
        let result = storage
            .write(&mut body, "videos", "1-2.mp4", 1024, &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
        assert_eq!(std::fs::read(dir.path().join("videos/1-2.mp4")).unwrap(), b"first");

        let stored = storage
            .write(&mut body, "videos", "1-3.mp4", 1024, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(std::fs::read(stored.absolute_path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_stream_error_cleans_up() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let chunks: Vec<io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"abc")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ];
        let mut body: ByteStream<'static> = Box::pin(stream::iter(chunks));

        let result = storage
            .write(&mut body, "videos", "1-2.mp4", 1024, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(StorageError::StreamFailed(_))));
        assert!(list(&dir.path().join("videos")).is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_cleans_up() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let cancel = CancellationToken::new();
        let first: ByteStream<'static> = Box::pin(stream::iter(vec![Ok(Bytes::from_static(b"abc"))]));
        let mut body: ByteStream<'static> = Box::pin(first.chain(stream::pending()));

        let writer = storage.clone();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            writer
                .write(&mut body, "videos", "1-2.mp4", 1024, &token)
                .await
        });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        cancel.cancel();

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(StorageError::Cancelled)));
        assert!(list(&dir.path().join("videos")).is_empty());
    }

    #[tokio::test]
    async fn test_dropped_write_cleans_up() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let first: ByteStream<'static> = Box::pin(stream::iter(vec![Ok(Bytes::from_static(b"abc"))]));
        let mut body: ByteStream<'static> = Box::pin(first.chain(stream::pending()));

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            storage.write(&mut body, "videos", "1-2.mp4", 1024, &CancellationToken::new()),
        )
        .await;

        assert!(result.is_err());
        assert!(list(&dir.path().join("videos")).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_key_rejected_before_io() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let mut body = chunked(b"x", 1);

        let result = storage
            .write(&mut body, "images", "../escape.png", 1024, &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage
            .write(&mut body, "../images", "1-2.png", 1024, &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert!(list(dir.path()).is_empty());
    }
}
