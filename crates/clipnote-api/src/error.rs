//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; any `AppError` (or type with an
//! `Into<AppError>` impl) converts with `?` and renders with the status, code
//! and log level its `ErrorMetadata` declares.

use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clipnote_core::{AppError, ErrorMetadata, LogLevel};
use clipnote_processing::ValidationError;
use clipnote_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    /// Build the body for `error`, omitting details when `hide_details` is set
    /// or the error is sensitive.
    pub fn from_app_error(error: &AppError, hide_details: bool) -> Self {
        let (details, error_type) = if hide_details || error.is_sensitive() {
            (None, None)
        } else {
            (
                Some(error.detailed_message()),
                Some(error.error_type().to_string()),
            )
        };

        Self {
            error: error.client_message(),
            details,
            error_type,
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: both IntoResponse and AppError are foreign to this crate)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Convert a request that is not a readable multipart form into a 400 with our ErrorResponse format.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid multipart request: {}",
            rejection.body_text()
        )))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(err.into())
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse::from_app_error(app_error, is_production_env());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipnote_core::Channel;

    #[test]
    fn test_status_codes_follow_error_class() {
        let cases = [
            (AppError::UnsupportedMediaType("only images are allowed.".into()), 400),
            (AppError::PayloadTooLarge("too big".into()), 413),
            (AppError::StorageExhausted { attempts: 5 }, 500),
            (AppError::StorageFailure("disk".into()), 500),
            (AppError::UploadInterrupted("reset".into()), 400),
            (AppError::InvalidInput("No file provided".into()), 400),
            (AppError::NotFound("File not found".into()), 404),
        ];
        for (err, status) in cases {
            let response = HttpAppError(err).into_response();
            assert_eq!(response.status().as_u16(), status);
        }
    }

    #[test]
    fn test_from_validation_error() {
        let err = clipnote_processing::classify("image/png", Channel::Video).unwrap_err();
        let HttpAppError(app_err) = err.into();
        match app_err {
            AppError::UnsupportedMediaType(msg) => assert_eq!(msg, "only videos are allowed."),
            other => panic!("Expected UnsupportedMediaType, got {other:?}"),
        }
    }

    #[test]
    fn test_from_storage_error_payload_too_large() {
        let HttpAppError(app_err) = StorageError::PayloadTooLarge { limit: 1024 }.into();
        assert!(matches!(app_err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_details_hidden_for_sensitive_errors() {
        let body = ErrorResponse::from_app_error(
            &AppError::StorageFailure("/srv/uploads: permission denied".into()),
            false,
        );
        assert_eq!(body.code, "STORAGE_ERROR");
        assert!(body.details.is_none());
        assert!(!body.error.contains("/srv/uploads"));
    }

    #[test]
    fn test_details_hidden_in_production() {
        let err = AppError::InvalidInput("No file provided".into());

        let body = ErrorResponse::from_app_error(&err, false);
        assert!(body.details.is_some());
        assert_eq!(body.error_type.as_deref(), Some("InvalidInput"));

        let body = ErrorResponse::from_app_error(&err, true);
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());
        assert_eq!(body.error, "No file provided");
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse::from_app_error(
            &AppError::UnsupportedMediaType("only images are allowed.".into()),
            true,
        );
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["error"], "only images are allowed.");
        assert_eq!(json["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(json["recoverable"].is_boolean());
        assert!(json.get("details").is_none());
    }
}
