//! Clipnote Storage Library
//!
//! This crate provides the storage writer abstraction used by the upload
//! gate, and its local filesystem implementation.
//!
//! # Layout
//!
//! Files are stored flat under `{base_path}/{channel}/{storage_key}`.
//! Channel directories and keys are single path segments: they must not
//! contain separators or `..`, and keys must not start with `.` (that
//! namespace is reserved for in-flight `.{key}.part` files).

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use clipnote_core::StorageBackend;
pub use factory::create_storage;
pub use keys::part_file_name;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{ByteStream, StorageError, StorageResult, StorageWriter, StoredFile};
