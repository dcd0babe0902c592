#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{StorageBackend, StorageResult, StorageWriter};
#[cfg(not(feature = "storage-local"))]
use crate::StorageError;
use clipnote_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn StorageWriter>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage = LocalStorage::new(config.upload_root()).await?;
            tracing::info!(
                base_path = %storage.base_path().display(),
                "Using local filesystem storage"
            );
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_local_storage_under_upload_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("public/uploads");
        let root_str = root.to_string_lossy().into_owned();
        let config = Config::from_vars(|key| match key {
            "UPLOAD_ROOT" => Some(root_str.clone()),
            _ => None,
        })
        .unwrap();

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert!(root.is_dir());
    }
}
