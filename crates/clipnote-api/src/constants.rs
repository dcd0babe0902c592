//! API constants

/// Versioned API prefix
pub const API_PREFIX: &str = "/api/v0";

/// Path under which stored files are served.
pub const PUBLIC_UPLOADS_PATH: &str = "/uploads";

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";
