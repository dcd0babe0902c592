//! Types for the upload gate.

use clipnote_storage::ByteStream;

/// One multipart file field, as handed over by the transport.
pub struct MultipartField<'a> {
    /// Client-supplied filename.
    pub original_name: String,
    /// Client-supplied `Content-Type` of the field.
    pub declared_mime_type: String,
    pub body: ByteStream<'a>,
}

impl<'a> MultipartField<'a> {
    pub fn new(
        original_name: impl Into<String>,
        declared_mime_type: impl Into<String>,
        body: ByteStream<'a>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            declared_mime_type: declared_mime_type.into(),
            body,
        }
    }
}

/// Byte ceilings per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLimits {
    pub image_max_bytes: u64,
    pub video_max_bytes: u64,
}
