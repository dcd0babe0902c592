use clipnote_core::{AppError, Channel};

/// Content classification errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported media type {content_type:?} for the {channel} channel")]
    UnsupportedMediaType {
        content_type: String,
        channel: Channel,
    },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnsupportedMediaType { channel, .. } => {
                AppError::UnsupportedMediaType(channel.rejection_message().to_string())
            }
        }
    }
}

/// Decide whether a declared content type is admissible on `channel`.
///
/// The major type is everything before the first `/`; it must equal the
/// channel's major type exactly. Strings without a `/` never pass.
pub fn classify(declared_mime_type: &str, channel: Channel) -> Result<(), ValidationError> {
    match declared_mime_type.split_once('/') {
        Some((major, _)) if major == channel.major_type() => Ok(()),
        _ => Err(ValidationError::UnsupportedMediaType {
            content_type: declared_mime_type.to_string(),
            channel,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_table() {
        let cases: &[(&str, Channel, bool)] = &[
            ("image/png", Channel::Image, true),
            ("image/jpeg", Channel::Image, true),
            ("image/svg+xml", Channel::Image, true),
            ("image/", Channel::Image, true),
            ("video/mp4", Channel::Video, true),
            ("video/quicktime", Channel::Video, true),
            ("video/png", Channel::Image, false),
            ("image/png", Channel::Video, false),
            ("application/octet-stream", Channel::Image, false),
            ("text/html", Channel::Video, false),
            ("image", Channel::Image, false),
            ("video", Channel::Video, false),
            ("", Channel::Image, false),
            ("/png", Channel::Image, false),
            ("imagex/png", Channel::Image, false),
            (" image/png", Channel::Image, false),
        ];

        for (mime, channel, accepted) in cases {
            assert_eq!(
                classify(mime, *channel).is_ok(),
                *accepted,
                "classify({mime:?}, {channel:?})"
            );
        }
    }

    #[test]
    fn classify_matches_prefix_rule() {
        let samples = [
            "image/png", "video/mp4", "image", "", "/", "image/a/b", "audio/mpeg", "video/",
            "IMAGE/PNG",
        ];
        for mime in samples {
            for channel in [Channel::Image, Channel::Video] {
                let expected = mime.starts_with(&format!("{}/", channel.major_type()));
                assert_eq!(classify(mime, channel).is_ok(), expected, "{mime:?}");
            }
        }
    }

    #[test]
    fn rejection_carries_channel_message() {
        let err: AppError = classify("image/png", Channel::Video).unwrap_err().into();
        match err {
            AppError::UnsupportedMediaType(msg) => assert_eq!(msg, "only videos are allowed."),
            other => panic!("unexpected {other:?}"),
        }

        let err: AppError = classify("video/mp4", Channel::Image).unwrap_err().into();
        assert_eq!(err.to_string(), "Unsupported media type: only images are allowed.");
    }
}
