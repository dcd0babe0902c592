//! Upload policy constants.

/// One mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Default ceiling for the image channel (5 MiB).
pub const IMAGE_MAX_BYTES: u64 = 5 * MIB;

/// Default ceiling for the video channel (500 MiB).
pub const VIDEO_MAX_BYTES: u64 = 500 * MIB;

/// Default number of storage keys tried before giving up on a collision.
pub const MAX_NAME_ATTEMPTS: u32 = 5;

/// Default root for uploaded files, relative to the working directory.
pub const UPLOAD_ROOT: &str = "public/uploads";

/// Subdirectory of the upload root holding image uploads.
pub const IMAGES_DIR: &str = "images";

/// Subdirectory of the upload root holding video uploads.
pub const VIDEOS_DIR: &str = "videos";

/// Exclusive upper bound of the random storage key suffix.
pub const KEY_SUFFIX_BOUND: u32 = 1_000_000_000;

/// Longest original extension (dot included) carried into a storage key.
pub const MAX_EXTENSION_BYTES: usize = 32;
